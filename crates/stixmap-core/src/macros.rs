//! Closed-vocabulary enum generator

/// Declares a closed STIX vocabulary as a `Copy` enum.
///
/// Generates `ALL`, `as_str`, `Display`, `FromStr` (failing with the given
/// error constructor) and serde support using the STIX names.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($unknown:path) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every member of the vocabulary, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// STIX name of this member
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($unknown(other.to_string())),
                }
            }
        }
    };
}
