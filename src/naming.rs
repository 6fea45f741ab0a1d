//! Generated names and their ordering.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Formats a room label as `"{type} {seq:000}"`.
#[must_use]
pub fn room_label(type_name: &str, sequence: u32) -> String {
    format!("{type_name} {sequence:03}")
}

type CompareFn = dyn Fn(Option<&str>, Option<&str>) -> Ordering + Send + Sync;

/// Natural ("alphanumeric") string ordering.
///
/// Strings are split into runs of digits, letters and everything else, then
/// compared run by run. Digit runs compare by value, so `"Type 2"` sorts
/// before `"Type 10"`.
#[derive(Clone)]
pub struct NaturalOrder {
    ignore_case: bool,
    custom: Option<Arc<CompareFn>>,
}

impl Default for NaturalOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NaturalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalOrder")
            .field("ignore_case", &self.ignore_case)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Letter,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            Self::Digit
        } else if c.is_alphabetic() {
            Self::Letter
        } else {
            Self::Other
        }
    }
}

impl NaturalOrder {
    /// Creates a case-insensitive ordering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ignore_case: true,
            custom: None,
        }
    }

    /// Sets whether letter runs compare case-insensitively.
    #[must_use]
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Replaces the whole ordering with `compare`.
    #[must_use]
    pub fn with_compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(Option<&str>, Option<&str>) -> Ordering + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(compare));
        self
    }

    /// Compares two strings that may be absent; absent sorts first.
    #[must_use]
    pub fn compare(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        if let Some(custom) = &self.custom {
            return custom(a, b);
        }
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => self.compare_runs(a, b),
        }
    }

    /// Compares two strings.
    #[must_use]
    pub fn compare_str(&self, a: &str, b: &str) -> Ordering {
        self.compare(Some(a), Some(b))
    }

    /// Sorts `items` in place by the string `key` returns.
    pub fn sort_by_key<T, F>(&self, items: &mut [T], key: F)
    where
        F: Fn(&T) -> &str,
    {
        items.sort_by(|a, b| self.compare_str(key(a), key(b)));
    }

    fn compare_runs(&self, a: &str, b: &str) -> Ordering {
        let left = split_runs(a);
        let right = split_runs(b);

        for (x, y) in left.iter().zip(&right) {
            let ord = match (is_digits(x), is_digits(y)) {
                (true, true) => compare_numeric(x, y),
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => match (is_letters(x), is_letters(y)) {
                    (true, true) if self.ignore_case => {
                        x.to_lowercase().cmp(&y.to_lowercase())
                    }
                    (true, true) | (false, false) => x.cmp(y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                },
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        left.len().cmp(&right.len())
    }
}

fn is_digits(run: &str) -> bool {
    !run.is_empty() && run.bytes().all(|b| b.is_ascii_digit())
}

/// Compares digit runs by value at any length; equal values order by
/// run length, so fewer leading zeros come first.
fn compare_numeric(x: &str, y: &str) -> Ordering {
    let (vx, vy) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
    vx.len()
        .cmp(&vy.len())
        .then_with(|| vx.cmp(vy))
        .then(x.len().cmp(&y.len()))
}

fn is_letters(run: &str) -> bool {
    !run.is_empty() && run.chars().all(char::is_alphabetic)
}

fn split_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut chars = s.char_indices();
    let Some((_, first)) = chars.next() else {
        return runs;
    };

    let mut start = 0;
    let mut class = CharClass::of(first);
    for (i, c) in chars {
        let next = CharClass::of(c);
        if next != class {
            runs.push(&s[start..i]);
            start = i;
            class = next;
        }
    }
    runs.push(&s[start..]);
    runs
}
