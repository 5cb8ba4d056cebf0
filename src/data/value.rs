use num_traits::ToPrimitive;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A single attribute value of a record.
///
/// Ordering is only meaningful between two `Numeric` values and `Categorical`
/// values only support equality. `Missing` never takes part in a test: it is
/// imputed while splitting and forks the traversal while classifying.
#[derive(Debug, Clone)]
pub enum AttributeValue {
    Numeric(f64),
    Categorical(String),
    Missing,
}

impl AttributeValue {
    /// Builds a numeric value from any primitive number.
    ///
    /// Values that can't be represented as `f64`, and `NaN`, become `Missing`.
    pub fn numeric<N: ToPrimitive>(n: N) -> Self {
        match n.to_f64() {
            Some(x) if !x.is_nan() => Self::Numeric(x),
            _ => Self::Missing,
        }
    }

    pub fn categorical(token: &str) -> Self {
        Self::Categorical(token.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            Self::Categorical(token) => Some(token),
            _ => None,
        }
    }

    /// Evaluates the binary split test against `split`.
    ///
    /// A numeric split sends values `>= split` to the left branch, a
    /// categorical split sends equal tokens to the left branch. Values of the
    /// other kind, and `Missing`, never satisfy the test.
    pub fn satisfies(&self, split: &AttributeValue) -> bool {
        match (self, split) {
            (Self::Numeric(x), Self::Numeric(threshold)) => x >= threshold,
            (Self::Categorical(token), Self::Categorical(expected)) => token == expected,
            _ => false,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a == b,
            (Self::Categorical(a), Self::Categorical(b)) => a == b,
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}

// `numeric` and `Dataset::new` both turn NaN into `Missing`, so stored values
// compare totally.
impl Eq for AttributeValue {}

impl Hash for AttributeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Numeric(x) => {
                let normalized = if *x == 0.0 { 0.0 } else { *x };
                normalized.to_bits().hash(state);
            }
            Self::Categorical(token) => token.hash(state),
            Self::Missing => {}
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Self::Numeric(x) => write!(f, "{}", x),
            Self::Categorical(token) => write!(f, "{}", token),
            Self::Missing => write!(f, "None"),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::numeric(n)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        Self::numeric(n)
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        Self::numeric(x)
    }
}

impl From<&str> for AttributeValue {
    fn from(token: &str) -> Self {
        Self::categorical(token)
    }
}

impl From<String> for AttributeValue {
    fn from(token: String) -> Self {
        Self::Categorical(token)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
