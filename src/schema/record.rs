//! Declarative helpers for the fixed-shape settings records.
//!
//! Every record in the configuration schema comes in two shapes: a fully
//! populated form used after resolution, and a partial overlay form where each
//! field is optional. Layering is always "copy every `Some` from the higher
//! layer", so both shapes and the glue between them are generated here from a
//! single field list.

/// Generates a closed string enum implementing [`NamedVariants`](crate::schema::NamedVariants).
macro_rules! named_enum {
    (
        $(#[$outer:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $crate::schema::NamedVariants for $name {
            const NAMES: &'static [&'static str] = &[$($text),+];

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::schema::NamedVariants::name(self))
            }
        }
    };
}

/// Generates a settings record, its overlay, and the layering glue.
///
/// The full record serializes with camelCase keys, matching the
/// `.augment/mcp-config.json` file format.
macro_rules! settings_record {
    (
        $(#[$outer:meta])*
        $name:ident / $overlay:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        impl $name {
            /// Overwrite every field the overlay sets.
            pub fn apply(&mut self, overlay: &$overlay) {
                $(
                    if let Some(value) = &overlay.$field {
                        self.$field = value.clone();
                    }
                )+
            }
        }

        #[doc = concat!("Partial form of [`", stringify!($name), "`]; `None` fields inherit from lower layers.")]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $overlay {
            $( pub $field: Option<$ty>, )+
        }

        impl $overlay {
            /// Copy every field set in `higher` over this overlay.
            pub fn merge_from(&mut self, higher: &Self) {
                $(
                    if let Some(value) = &higher.$field {
                        self.$field = Some(value.clone());
                    }
                )+
            }

            /// True when no field is set.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }

        impl From<&$name> for $overlay {
            fn from(settings: &$name) -> Self {
                Self {
                    $( $field: Some(settings.$field.clone()), )+
                }
            }
        }
    };
}

pub(crate) use named_enum;
pub(crate) use settings_record;
