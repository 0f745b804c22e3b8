//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Generated constructors for collection-style port errors.

    use rstest::rstest;

    define_port_error! {
        /// Failures of an upload endpoint.
        pub enum UploadError {
            /// Connection dropped mid-upload.
            Interrupted { message: String } => "upload interrupted: {message}",
            /// The server refused the file.
            Rejected { status: u16, message: String } => "upload rejected ({status}): {message}",
            /// The server returned its size limit only.
            TooLarge { limit_bytes: u64 } => "upload exceeds {limit_bytes} bytes",
            /// No file was selected.
            Missing => "no file selected",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        let err = UploadError::interrupted("reset by peer");
        assert_eq!(
            err,
            UploadError::Interrupted {
                message: "reset by peer".to_owned()
            }
        );
    }

    #[rstest]
    #[case::status_and_message(
        UploadError::rejected(415_u16, "image/tiff"),
        "upload rejected (415): image/tiff"
    )]
    #[case::numeric_only(UploadError::too_large(5_242_880_u64), "upload exceeds 5242880 bytes")]
    #[case::unit(UploadError::missing(), "no file selected")]
    fn display_uses_declared_messages(#[case] err: UploadError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn snake_case_constructor_names_follow_variants() {
        assert_eq!(
            UploadError::too_large(1_u64),
            UploadError::TooLarge { limit_bytes: 1 }
        );
        assert_eq!(UploadError::missing(), UploadError::Missing);
    }
}
