/// Converts errors from their error type (of the submodule) to that of
/// a `way_attributes::Error` variant, or of any other enum when the
/// target is given explicitly.
///
/// ```rust,ignore
/// use way_attributes::encoded::SlotError;
/// way_attributes::impl_err!(SlotError, Slot);
/// way_attributes::impl_err!(SlotError, MyError, Storage);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
        ($from:ty, $to:ty, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    <$to>::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
