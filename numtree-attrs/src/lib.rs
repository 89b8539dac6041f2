mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields, or a unit struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use numtree_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "this variable has no value", labels = ["this variable"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of texts for the labels pointing at each span of the error.         |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
/// | `note`      | Optional note with additional context.                                       |
///
/// `message` is required. Each tag accepts an expression; `message`, `help` and `note` should
/// evaluate to something that implements [`ToString`]. The expressions are evaluated with the
/// fields of the struct in scope (and `self`), so they can be used in the expression.
///
/// Labels are paired with the error's spans in order. Extra labels without a matching span are
/// dropped; an empty label string produces an unlabeled highlight.
///
/// [`ErrorKind`]: https://docs.rs/numtree-error/latest/numtree_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl numtree_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
