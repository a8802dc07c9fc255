// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Procedural macros for declaring ktest unit tests.
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{
    Error, Ident, ItemFn, Token, ext::IdentExt, parse::Parser, parse_macro_input,
    punctuated::Punctuated,
};

/// Marks a function as a unit test.
///
/// # Example
///
/// ```rust,ignore
/// use ktest::{assert_eq, def_test};
///
/// #[def_test]
/// fn test_addition() {
///     let a = 2 + 2;
///     assert_eq!(a, 4);
/// }
/// ```
///
/// The function is registered with the harness when the binary is linked; it
/// runs in declaration order relative to the other tests of the same file.
/// It must take no arguments and return nothing.
///
/// # Attributes
/// - `#[def_test]` - Normal test
/// - `#[def_test(ignore)]` - Test is registered but skipped by the runner
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match generate_function_test(attr, input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Options accepted inside `#[def_test(..)]`.
#[derive(Default)]
struct TestOptions {
    ignore: bool,
}

fn parse_options(attr: TokenStream) -> syn::Result<TestOptions> {
    let idents = Punctuated::<Ident, Token![,]>::parse_terminated.parse(attr)?;
    let mut options = TestOptions::default();
    for ident in idents {
        if ident == "ignore" {
            options.ignore = true;
        } else {
            return Err(Error::new(
                ident.span(),
                format!("unknown test option `{ident}`, expected `ignore`"),
            ));
        }
    }
    Ok(options)
}

fn check_signature(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;
    // Test bodies are plain `fn()` pointers in the registry.
    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(
            &sig.inputs,
            "expect no input arguments for the test function",
        ));
    }
    if let syn::ReturnType::Type(..) = sig.output {
        return Err(Error::new_spanned(
            &sig.output,
            "expect no return value for the test function",
        ));
    }
    if sig.asyncness.is_some() {
        return Err(Error::new_spanned(
            &sig.asyncness,
            "async test functions are not supported",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "test functions cannot be generic",
        ));
    }
    Ok(())
}

/// Generate test code for a single function
fn generate_function_test(
    attr: TokenStream,
    input: ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    let options = parse_options(attr)?;
    check_signature(&input)?;

    let fn_name = &input.sig.ident;
    // `r#loop` is reported as `loop`.
    let bare_name = fn_name.unraw();
    let fn_name_str = bare_name.to_string();
    let ignore = options.ignore;

    // No case folding: `foo` and `FOO` are distinct tests.
    let case_name = format_ident!("__ktest_case_{}", bare_name, span = Span::call_site());

    // The slice element carries the declaration site so the runner can
    // restore declaration order.
    Ok(quote! {
        #input

        #[::ktest::__private::distributed_slice(::ktest::__private::TESTS)]
        #[linkme(crate = ::ktest::__private::linkme)]
        #[allow(non_upper_case_globals)]
        #[doc(hidden)]
        static #case_name: ::ktest::TestCase = ::ktest::TestCase::new(
            #fn_name_str,
            ::core::module_path!(),
            ::core::file!(),
            ::core::line!(),
            ::core::column!(),
            #fn_name,
            #ignore,
        );
    })
}
