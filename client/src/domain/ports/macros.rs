//! Helper macro for declaring port error enums.
//!
//! Ports own their error vocabulary so adapters stay swappable. Every
//! variant carries exactly one named field and gets a snake_case
//! constructor accepting `impl Into<FieldType>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    define_port_error! {
        /// Example error for macro coverage.
        pub enum ExamplePortError {
            /// Something broke.
            Broken { message: String } => "broken: {message}",
            /// Something counted.
            Counted { count: u32 } => "counted: {count}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::broken("hello");
        assert_eq!(err.to_string(), "broken: hello");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::counted(3_u32);
        assert_eq!(err.to_string(), "counted: 3");
    }
}
