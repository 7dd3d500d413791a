//! Variant gating: each operation touches only the variant it is defined on.

#[macro_use]
mod common;

use asum::{OptionAsync, ResultAsync};
use common::*;
use futures_lite::future::block_on;

fn init_test(name: &str) {
    init_test_logging();
    test_phase!(name);
}

/// A lazily observed `Some(value)` that counts whether it was awaited.
fn counted_some(calls: &Calls, value: u8) -> OptionAsync<u8> {
    let seen = calls.clone();
    OptionAsync::some(value).inspect(move |_| seen.hit())
}

/// A lazily observed `Ok(value)` that counts whether it was awaited.
fn counted_ok<E: Send + 'static>(calls: &Calls, value: u8) -> ResultAsync<u8, E> {
    let seen = calls.clone();
    ResultAsync::ok(value).inspect(move |_| seen.hit())
}

#[test]
fn option_and_awaits_other_only_when_present() {
    init_test("option_and_awaits_other_only_when_present");
    let calls = Calls::new();

    test_section!("present");
    let value = block_on(OptionAsync::some(1).and(counted_some(&calls, 2)));
    assert_with_log!(value == Some(2), "other taken", Some(2), value);
    let count = calls.count();
    assert_with_log!(count == 1, "other awaited", 1, count);

    test_section!("absent");
    let value = block_on(OptionAsync::<u8>::none().and(counted_some(&calls, 3)));
    assert_with_log!(value.is_none(), "stays absent", None::<u8>, value);
    let count = calls.count();
    assert_with_log!(count == 1, "other skipped", 1, count);
    test_complete!("option_and_awaits_other_only_when_present");
}

#[test]
fn option_or_awaits_other_only_when_absent() {
    init_test("option_or_awaits_other_only_when_absent");
    let calls = Calls::new();

    test_section!("present");
    let value = block_on(OptionAsync::some(1).or(counted_some(&calls, 2)));
    assert_with_log!(value == Some(1), "keeps own value", Some(1), value);
    let count = calls.count();
    assert_with_log!(count == 0, "other skipped", 0, count);

    test_section!("absent");
    let value = block_on(OptionAsync::none().or(counted_some(&calls, 3)));
    assert_with_log!(value == Some(3), "falls back", Some(3), value);
    let count = calls.count();
    assert_with_log!(count == 1, "other awaited", 1, count);
    test_complete!("option_or_awaits_other_only_when_absent");
}

#[test]
fn result_and_keeps_first_error() {
    init_test("result_and_keeps_first_error");
    let calls = Calls::new();

    let value = block_on(ResultAsync::<u8, &str>::ok(1).and(counted_ok(&calls, 2)));
    assert_with_log!(value == Ok(2), "other taken", "Ok(2)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "other awaited", 1, count);

    let value = block_on(ResultAsync::<u8, &str>::err("first").and(counted_ok(&calls, 3)));
    assert_with_log!(value == Err("first"), "own error", "Err(first)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "other skipped", 1, count);
    test_complete!("result_and_keeps_first_error");
}

#[test]
fn result_or_recovers_only_from_error() {
    init_test("result_or_recovers_only_from_error");
    let calls = Calls::new();

    let value = block_on(ResultAsync::<u8, &str>::ok(1).or(counted_ok::<u32>(&calls, 2)));
    assert_with_log!(value == Ok(1), "keeps own value", "Ok(1)", value);
    let count = calls.count();
    assert_with_log!(count == 0, "other skipped", 0, count);

    let value = block_on(ResultAsync::<u8, &str>::err("lost").or(counted_ok::<u32>(&calls, 3)));
    assert_with_log!(value == Ok(3), "recovered", "Ok(3)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "other awaited", 1, count);
    test_complete!("result_or_recovers_only_from_error");
}

#[test]
fn inspect_err_sees_only_errors() {
    init_test("inspect_err_sees_only_errors");
    let calls = Calls::new();

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::ok(4).inspect_err(move |_| seen.hit()));
    assert_with_log!(value == Ok(4), "ok passes through", "Ok(4)", value);
    let count = calls.count();
    assert_with_log!(count == 0, "not called on Ok", 0, count);

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::err("bad").inspect_err(move |err| {
        assert_eq!(*err, "bad");
        seen.hit();
    }));
    assert_with_log!(value == Err("bad"), "error unchanged", "Err(bad)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "called on Err", 1, count);
    test_complete!("inspect_err_sees_only_errors");
}

#[test]
fn map_err_async_runs_only_on_error() {
    init_test("map_err_async_runs_only_on_error");
    let calls = Calls::new();

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::ok(5).map_err_async(move |err| {
        seen.hit();
        async move { err.len() }
    }));
    assert_with_log!(value == Ok(5), "ok untouched", "Ok(5)", value);
    let count = calls.count();
    assert_with_log!(count == 0, "mapper skipped", 0, count);

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::err("four").map_err_async(move |err| {
        seen.hit();
        async move {
            yield_times(2).await;
            err.len()
        }
    }));
    assert_with_log!(value == Err(4), "mapped error", "Err(4)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "mapper ran once", 1, count);
    test_complete!("map_err_async_runs_only_on_error");
}

#[test]
fn or_else_async_recovers_only_from_error() {
    init_test("or_else_async_recovers_only_from_error");
    let calls = Calls::new();

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::ok(6).or_else_async(move |_| {
        seen.hit();
        async { Ok::<u8, ()>(0) }
    }));
    assert_with_log!(value == Ok(6), "ok untouched", "Ok(6)", value);
    let count = calls.count();
    assert_with_log!(count == 0, "recovery skipped", 0, count);

    let seen = calls.clone();
    let value = block_on(ResultAsync::<u8, &str>::err("retry").or_else_async(move |err| {
        seen.hit();
        async move {
            yield_times(1).await;
            if err == "retry" { Ok(7) } else { Err(()) }
        }
    }));
    assert_with_log!(value == Ok(7), "recovered", "Ok(7)", value);
    let count = calls.count();
    assert_with_log!(count == 1, "recovery ran once", 1, count);

    let value = block_on(ResultAsync::<u8, &str>::err("fatal").or_else_async(|_| async { Err::<u8, u8>(9) }));
    assert_with_log!(value == Err(9), "new error type", "Err(9)", value);
    test_complete!("or_else_async_recovers_only_from_error");
}
