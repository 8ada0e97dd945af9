//! Value model for the structured dumper.
//!
//! Rendering works over open-ended object graphs whose shape is not known to
//! the renderer. Each renderable type implements [`Inspect`], which classifies
//! the value as absent, scalar, sequence, or composite, and exposes children
//! as further `&dyn Inspect` references. Cycle detection uses reference
//! identity ([`Identity`]), never structural equality.

use std::any::{Any, TypeId};

use chrono::{DateTime, Utc};

/// An indivisible displayable value.
pub enum Scalar<'a> {
    Bool(bool),
    /// Signed integer, displayed with thousands separators.
    Int(i128),
    /// Unsigned integer, displayed with thousands separators.
    Uint(u128),
    Float(f64),
    Str(&'a str),
    Timestamp(DateTime<Utc>),
    /// Enumerated constant, displayed by variant name.
    Enum(&'static str),
}

impl Scalar<'_> {
    /// Display form used for a single rendered line.
    pub fn display(&self) -> String {
        match self {
            Scalar::Bool(v) => v.to_string(),
            Scalar::Int(v) => group_digits(&v.to_string()),
            Scalar::Uint(v) => group_digits(&v.to_string()),
            Scalar::Float(v) => v.to_string(),
            Scalar::Str(v) => (*v).to_string(),
            Scalar::Timestamp(v) => v.to_string(),
            Scalar::Enum(v) => (*v).to_string(),
        }
    }
}

/// Classification of a value at render time.
pub enum Shape<'a> {
    /// Absent value (`Option::None` and friends).
    Null,
    /// Transparent indirection (`Option::Some`, `Box`, `Rc`). Resolved before
    /// every rendering rule so handlers match the inner type.
    Wrapped(&'a dyn Inspect),
    Scalar(Scalar<'a>),
    /// Ordered elements, iterated exactly once per render.
    Sequence(Box<dyn Iterator<Item = &'a dyn Inspect> + 'a>),
    /// Named attributes in declaration order.
    Composite(Vec<(&'static str, &'a dyn Inspect)>),
}

/// Capability trait implemented by every renderable type.
///
/// This replaces the runtime reflection of dynamically typed dumpers: a value
/// describes its own shape, and `as_any` supports per-type handler dispatch
/// and identity comparison.
pub trait Inspect {
    fn shape(&self) -> Shape<'_>;
    fn as_any(&self) -> &dyn Any;
}

/// A composite whose column set is known statically, so it can be laid out as
/// an HTML table even when there are zero rows.
pub trait Record: Inspect {
    /// Attribute names in declaration order.
    fn columns() -> &'static [&'static str]
    where
        Self: Sized;

    /// Attribute values for one row, aligned with [`Record::columns`].
    fn fields(&self) -> Vec<(&'static str, &dyn Inspect)>;
}

/// Reference identity of a value, used for cycle detection.
///
/// The data pointer alone is not enough: a struct and its first field share an
/// address, so the concrete type is part of the identity. Two equal scalars at
/// different addresses never alias.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Identity {
    addr: usize,
    type_id: TypeId,
}

impl Identity {
    pub fn of(value: &dyn Inspect) -> Self {
        Self {
            addr: value as *const dyn Inspect as *const () as usize,
            type_id: value.as_any().type_id(),
        }
    }
}

/// Insert thousands separators into a decimal string.
pub(crate) fn group_digits(raw: &str) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let mut out = String::with_capacity(raw.len() + digits.len() / 3);
    out.push_str(sign);
    let count = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

macro_rules! impl_scalar_signed {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Scalar(Scalar::Int(*self as i128))
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        })*
    };
}

macro_rules! impl_scalar_unsigned {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Scalar(Scalar::Uint(*self as u128))
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        })*
    };
}

impl_scalar_signed!(i8, i16, i32, i64, i128, isize);
impl_scalar_unsigned!(u8, u16, u32, u64, u128, usize);

impl Inspect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(f64::from(*self)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(*self))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Inspect for DateTime<Utc> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Timestamp(*self))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect + 'static> Inspect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => Shape::Wrapped(inner),
            None => Shape::Null,
        }
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect + 'static> Inspect for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Wrapped(&**self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect + 'static> Inspect for std::rc::Rc<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Wrapped(&**self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Inspect + 'static> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(|item| item as &dyn Inspect)))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Implement [`Inspect`] for a struct by listing its renderable fields in
/// declaration order.
#[macro_export]
macro_rules! impl_composite {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::core::Inspect for $ty {
            fn shape(&self) -> $crate::core::Shape<'_> {
                $crate::core::Shape::Composite(::std::vec![
                    $((stringify!($field), &self.$field as &dyn $crate::core::Inspect)),*
                ])
            }
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Implement [`Inspect`] and [`Record`] for a struct used as a table row.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::core::Inspect for $ty {
            fn shape(&self) -> $crate::core::Shape<'_> {
                $crate::core::Shape::Composite($crate::core::Record::fields(self))
            }
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::core::Record for $ty {
            fn columns() -> &'static [&'static str] {
                &[$(stringify!($field)),+]
            }
            fn fields(&self) -> ::std::vec::Vec<(&'static str, &dyn $crate::core::Inspect)> {
                ::std::vec![
                    $((stringify!($field), &self.$field as &dyn $crate::core::Inspect)),+
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("-1234"), "-1,234");
        assert_eq!(group_digits("0"), "0");
    }

    #[test]
    fn test_integer_scalars_group() {
        let value = 1_234_567u64;
        match value.shape() {
            Shape::Scalar(s) => assert_eq!(s.display(), "1,234,567"),
            _ => panic!("expected scalar"),
        };
    }

    #[test]
    fn test_float_natural_form() {
        let value = 30.0f64;
        match value.shape() {
            Shape::Scalar(s) => assert_eq!(s.display(), "30"),
            _ => panic!("expected scalar"),
        };
    }

    #[test]
    fn test_option_shapes() {
        let absent: Option<u32> = None;
        assert!(matches!(absent.shape(), Shape::Null));
        let present = Some(3u32);
        assert!(matches!(present.shape(), Shape::Wrapped(_)));
    }

    #[test]
    fn test_identity_distinguishes_values() {
        let a = String::from("x");
        let b = String::from("x");
        assert_ne!(
            Identity::of(&a as &dyn Inspect),
            Identity::of(&b as &dyn Inspect)
        );
        assert_eq!(
            Identity::of(&a as &dyn Inspect),
            Identity::of(&a as &dyn Inspect)
        );
    }

    struct Outer {
        first: u64,
    }
    impl_composite!(Outer { first });

    #[test]
    fn test_identity_separates_struct_from_first_field() {
        let outer = Outer { first: 7 };
        let whole = Identity::of(&outer as &dyn Inspect);
        let field = Identity::of(&outer.first as &dyn Inspect);
        assert_ne!(whole, field);
    }
}
