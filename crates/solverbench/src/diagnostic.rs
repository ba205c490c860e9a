//! Per-thread diagnostic context.
//!
//! Log pipelines attribute output to a benchmark run through the key
//! [`SUB_SINGLE_BENCHMARK_NAME_KEY`]. A binding lives exactly as long as the
//! [`DiagnosticGuard`] returned by [`put`]; dropping the guard (normal return,
//! `?` propagation or unwinding) restores whatever was bound before.
//!
//! # Example
//!
//! ```
//! use solverbench::diagnostic::{self, SUB_SINGLE_BENCHMARK_NAME_KEY};
//!
//! {
//!     let _guard = diagnostic::put(SUB_SINGLE_BENCHMARK_NAME_KEY, "nqueens_hc_0");
//!     assert_eq!(
//!         diagnostic::get(SUB_SINGLE_BENCHMARK_NAME_KEY).as_deref(),
//!         Some("nqueens_hc_0")
//!     );
//! }
//! assert!(diagnostic::get(SUB_SINGLE_BENCHMARK_NAME_KEY).is_none());
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Key carrying the name of the sub-single benchmark running on this thread.
pub const SUB_SINGLE_BENCHMARK_NAME_KEY: &str = "subSingleBenchmark.name";

thread_local! {
    static CONTEXT: RefCell<BTreeMap<&'static str, String>> = const { RefCell::new(BTreeMap::new()) };
}

/// Binds `value` under `key` on the current thread until the guard drops.
#[must_use = "the binding is removed as soon as the guard is dropped"]
pub fn put(key: &'static str, value: impl Into<String>) -> DiagnosticGuard {
    let previous = CONTEXT.with(|context| context.borrow_mut().insert(key, value.into()));
    DiagnosticGuard {
        key,
        previous,
        _not_send: PhantomData,
    }
}

/// Returns the value bound under `key` on the current thread.
pub fn get(key: &str) -> Option<String> {
    CONTEXT.with(|context| context.borrow().get(key).cloned())
}

/// Scoped binding in the diagnostic context.
///
/// Not `Send`: the binding belongs to the thread that created it.
#[derive(Debug)]
pub struct DiagnosticGuard {
    key: &'static str,
    previous: Option<String>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for DiagnosticGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // try_with: the thread-local may already be gone during thread teardown.
        let _ = CONTEXT.try_with(|context| {
            let mut context = context.borrow_mut();
            match previous {
                Some(value) => {
                    context.insert(self.key, value);
                }
                None => {
                    context.remove(self.key);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_release() {
        {
            let _guard = put(SUB_SINGLE_BENCHMARK_NAME_KEY, "a_0");
            assert_eq!(get(SUB_SINGLE_BENCHMARK_NAME_KEY).as_deref(), Some("a_0"));
        }
        assert_eq!(get(SUB_SINGLE_BENCHMARK_NAME_KEY), None);
    }

    #[test]
    fn test_nested_binding_restores_outer() {
        let _outer = put(SUB_SINGLE_BENCHMARK_NAME_KEY, "outer");
        {
            let _inner = put(SUB_SINGLE_BENCHMARK_NAME_KEY, "inner");
            assert_eq!(get(SUB_SINGLE_BENCHMARK_NAME_KEY).as_deref(), Some("inner"));
        }
        assert_eq!(get(SUB_SINGLE_BENCHMARK_NAME_KEY).as_deref(), Some("outer"));
    }

    #[test]
    fn test_binding_is_per_thread() {
        let _guard = put(SUB_SINGLE_BENCHMARK_NAME_KEY, "main");
        let seen = std::thread::spawn(|| get(SUB_SINGLE_BENCHMARK_NAME_KEY))
            .join()
            .unwrap();
        assert_eq!(seen, None);
    }

    #[test]
    fn test_released_on_unwind() {
        let result = std::panic::catch_unwind(|| {
            let _guard = put(SUB_SINGLE_BENCHMARK_NAME_KEY, "panicking");
            panic!("solver blew up");
        });
        assert!(result.is_err());
        assert_eq!(get(SUB_SINGLE_BENCHMARK_NAME_KEY), None);
    }
}
