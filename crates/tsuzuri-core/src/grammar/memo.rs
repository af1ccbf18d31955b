//! # Memoization and Profiling
//!
//! [`MemoCache`] is an explicit cache object: whoever builds the grammars
//! owns it and decides when entries are evicted. [`Memoize`] consults it before
//! running the wrapped grammar, keyed by (grammar name, input text, position).
//! Caching is transparent: a hit returns exactly what the grammar would have
//! returned.
//!
//! [`Profiled`] reports elapsed time per grammar invocation to an injected hook.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::cursor::{Cursor, Failure, Grammar, Parsed};

type MemoEntry = Arc<dyn Any + Send + Sync>;
type PositionTable = HashMap<(&'static str, usize), MemoEntry>;

/// Thread-safe store of grammar results, shared by every [`Memoize`] built
/// against it.
#[derive(Default)]
pub struct MemoCache {
    entries: Mutex<HashMap<String, PositionTable>>,
}

impl MemoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Drops the results cached for one input text.
    pub fn evict(&self, source: &str) {
        self.entries.lock().remove(source);
    }

    /// Number of cached (grammar, input, position) results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, source: &str, key: (&'static str, usize)) -> Option<MemoEntry> {
        self.entries.lock().get(source)?.get(&key).cloned()
    }

    fn insert(&self, source: &str, key: (&'static str, usize), entry: MemoEntry) {
        let mut entries = self.entries.lock();
        match entries.get_mut(source) {
            Some(table) => {
                table.insert(key, entry);
            }
            None => {
                let mut table = PositionTable::new();
                table.insert(key, entry);
                entries.insert(source.to_string(), table);
            }
        }
    }
}

impl fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache").field("len", &self.len()).finish()
    }
}

/// Cached outcome, with the end cursor stored as a byte offset.
type Stored<T> = Result<(usize, T), Failure>;

/// Wraps a grammar so repeated runs at the same input position reuse the
/// first result.
pub struct Memoize<G> {
    grammar: G,
    name: &'static str,
    cache: Arc<MemoCache>,
}

impl<G> Grammar for Memoize<G>
where
    G: Grammar,
    G::Output: Clone + Send + Sync + 'static,
{
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        let key = (self.name, input.position());
        let start = Cursor::new(input.source());

        if let Some(entry) = self.cache.get(input.source(), key) {
            if let Some(stored) = entry.downcast_ref::<Stored<G::Output>>() {
                return stored
                    .clone()
                    .map(|(end, value)| (start.advance(end), value));
            }
        }

        // the lock is not held here, so nested memoized grammars are fine
        let result = self.grammar.parse(input);
        let stored: Stored<G::Output> = result
            .clone()
            .map(|(rest, value)| (rest.position(), value));
        self.cache.insert(input.source(), key, Arc::new(stored));
        result
    }
}

impl<G> fmt::Debug for Memoize<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoize").field("name", &self.name).finish()
    }
}

/// Constructor for [`Memoize`]. `name` must be unique per grammar sharing the
/// cache.
pub fn memoize<G>(grammar: G, name: &'static str, cache: Arc<MemoCache>) -> Memoize<G>
where
    G: Grammar,
    G::Output: Clone + Send + Sync + 'static,
{
    Memoize {
        grammar,
        name,
        cache,
    }
}

/// Hook receiving (grammar name, elapsed time) for each profiled invocation.
pub type Profiler = Arc<dyn Fn(&'static str, Duration) + Send + Sync>;

/// Times a grammar and reports to a [`Profiler`], if one is installed.
pub struct Profiled<G> {
    grammar: G,
    name: &'static str,
    profiler: Option<Profiler>,
}

impl<G: Grammar> Grammar for Profiled<G> {
    type Output = G::Output;

    fn parse<'a>(&self, input: Cursor<'a>) -> Parsed<'a, Self::Output> {
        match &self.profiler {
            None => self.grammar.parse(input),
            Some(profiler) => {
                let started = Instant::now();
                let result = self.grammar.parse(input);
                (profiler.as_ref())(self.name, started.elapsed());
                result
            }
        }
    }
}

impl<G> fmt::Debug for Profiled<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profiled")
            .field("name", &self.name)
            .field("enabled", &self.profiler.is_some())
            .finish()
    }
}

pub fn profiled<G: Grammar>(
    grammar: G,
    name: &'static str,
    profiler: Option<Profiler>,
) -> Profiled<G> {
    Profiled {
        grammar,
        name,
        profiler,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::grammar::chars::number;
    use crate::grammar::combinators::{preceded, scan_for};
    use crate::grammar::cursor::from_fn;

    fn counting(calls: Arc<AtomicUsize>) -> impl Grammar<Output = u32> {
        from_fn(move |input| {
            calls.fetch_add(1, Ordering::SeqCst);
            number().parse(input)
        })
    }

    #[test]
    fn memoize_reuses_results() {
        let cache = Arc::new(MemoCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let grammar = memoize(counting(calls.clone()), "number", cache.clone());

        let first = grammar.parse_str("42 rest").unwrap();
        let second = grammar.parse_str("42 rest").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.0.remaining(), " rest");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        grammar.parse_str("42 rest").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn evict_drops_one_input() {
        let cache = Arc::new(MemoCache::new());
        let grammar = memoize(number(), "number", cache.clone());
        grammar.parse_str("1").unwrap();
        grammar.parse_str("2").unwrap();
        assert_eq!(cache.len(), 2);

        cache.evict("1");
        assert_eq!(cache.len(), 1);
        cache.evict("not cached");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn memoize_under_concurrent_use() {
        let cache = Arc::new(MemoCache::new());
        let cached = memoize(
            scan_for(preceded(crate::grammar::chars::whitespace(), number())),
            "scan",
            cache,
        );
        let plain = scan_for(preceded(crate::grammar::chars::whitespace(), number()));
        let inputs = ["Show - 07", "Other 12 x", "none", " 1 2"];

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let cached = &cached;
                let plain = &plain;
                scope.spawn(move || {
                    for round in 0..50 {
                        let input = inputs[(worker + round) % inputs.len()];
                        assert_eq!(cached.parse_str(input), plain.parse_str(input), "{input}");
                    }
                });
            }
        });
    }

    #[test]
    fn memoize_caches_failures() {
        let cache = Arc::new(MemoCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let grammar = memoize(counting(calls.clone()), "number", cache);

        let first = grammar.parse_str("x").unwrap_err();
        let second = grammar.parse_str("x").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn memoize_distinguishes_inputs_and_positions() {
        let cache = Arc::new(MemoCache::new());
        let grammar = memoize(number(), "number", cache.clone());
        assert_eq!(grammar.value_of("1"), Some(1));
        assert_eq!(grammar.value_of("2"), Some(2));

        let shifted = Cursor::new("1 3").advance(2);
        assert_eq!(grammar.parse(shifted).unwrap().1, 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn memoize_is_transparent() {
        let cache = Arc::new(MemoCache::new());
        let plain = scan_for(preceded(crate::grammar::chars::whitespace(), number()));
        let cached = memoize(
            scan_for(preceded(crate::grammar::chars::whitespace(), number())),
            "scan",
            cache,
        );
        for input in ["Show - 07", "none", " 1 2", ""] {
            assert_eq!(plain.parse_str(input), cached.parse_str(input), "{input}");
            assert_eq!(plain.parse_str(input), cached.parse_str(input), "{input}");
        }
    }

    #[test]
    fn memo_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoCache>();
        assert_send_sync::<Memoize<crate::grammar::chars::Number>>();
    }

    #[test]
    fn profiler_receives_timings() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let profiler: Profiler = Arc::new(move |name: &'static str, _elapsed: Duration| {
            sink.lock().push(name);
        });

        let grammar = profiled(number(), "number", Some(profiler));
        grammar.parse_str("1").unwrap();
        assert!(grammar.parse_str("x").is_err());
        assert_eq!(*seen.lock(), vec!["number", "number"]);

        let silent = profiled(number(), "number", None);
        assert_eq!(silent.value_of("5"), Some(5));
    }
}
