//! Lazily resolved default values.

use std::fmt;

type Producer<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Fallback used when the store has nothing usable for a key.
///
/// Either a literal value or a producer invoked on demand. A binding
/// resolves it at most once, at its first read.
pub enum DefaultValue<T> {
    Literal(T),
    Producer(Producer<T>),
}

impl<T: Clone> DefaultValue<T> {
    /// Create a default computed by `f`.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Producer(Box::new(f))
    }

    /// Produce the default value.
    pub fn resolve(&self) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(produce) => produce(),
        }
    }
}

impl<T> From<T> for DefaultValue<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for DefaultValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}
