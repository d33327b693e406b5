//! The `record!` declaration macro.

/// Declare a struct whose fields can be bound to CSV columns.
///
/// A field is bound to a column with a `#[csv = "column"]` annotation placed
/// after its doc comments. Fields without an annotation are never written.
/// Fields whose type is itself a record are flattened into the parent: their
/// annotated fields bind as if declared inline, at any depth.
///
/// ```
/// use structer_core::{record, RecordSchema};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Fruit {
///         #[csv = "name"]
///         pub name: String,
///         #[csv = "count"]
///         pub count: i64,
///         pub origin: Origin,
///     }
/// }
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Origin {
///         #[csv = "country"]
///         pub country: String,
///     }
/// }
///
/// let schema = RecordSchema::new(&Fruit::default(), &["name", "count", "country"]).unwrap();
/// let fruit: Fruit = schema.read(&["apple", "43", "NZ"]).unwrap();
/// assert_eq!(fruit.origin.country, "NZ");
/// ```
///
/// Struct-level attributes are passed through unchanged, but a field accepts
/// only doc comments followed by an optional `#[csv = ".."]` tag. Any other
/// field attribute (`#[allow(..)]`, `#[serde(..)]`) does not match:
///
/// ```compile_fail
/// use structer_core::record;
///
/// record! {
///     pub struct Tagged {
///         #[csv = "id"]
///         #[allow(dead_code)]
///         pub id: i64,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[csv = $column:literal])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Reflect for $name {
            fn reflect(&self) -> $crate::FieldRef<'_> {
                $crate::FieldRef::Record(self)
            }

            fn reflect_mut(&mut self) -> $crate::FieldMut<'_> {
                $crate::FieldMut::Record(self)
            }
        }

        impl $crate::Record for $name {
            fn record_type(&self) -> ::std::any::TypeId {
                ::std::any::TypeId::of::<Self>()
            }

            fn fields(&self) -> &'static [$crate::FieldInfo] {
                const FIELDS: &[$crate::FieldInfo] = &[
                    $(
                        $crate::FieldInfo {
                            name: stringify!($field),
                            column: $crate::__record_column!($($column)?),
                            visibility: $crate::Visibility::from_token(stringify!($fvis)),
                        },
                    )*
                ];
                FIELDS
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field(&self, index: usize) -> ::std::option::Option<$crate::FieldRef<'_>> {
                let mut position = 0usize;
                $(
                    if position == index {
                        return ::std::option::Option::Some($crate::Reflect::reflect(&self.$field));
                    }
                    position += 1;
                )*
                ::std::option::Option::None
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(&mut self, index: usize) -> ::std::option::Option<$crate::FieldMut<'_>> {
                let mut position = 0usize;
                $(
                    if position == index {
                        return ::std::option::Option::Some(
                            $crate::Reflect::reflect_mut(&mut self.$field),
                        );
                    }
                    position += 1;
                )*
                ::std::option::Option::None
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_column {
    () => {
        ::std::option::Option::None
    };
    ($column:literal) => {
        ::std::option::Option::Some($column)
    };
}
