//! This crate provides a procedural macro for marking the event handler of a Playdate game
//! built on [pdshim](https://crates.io/crates/pdshim).

use parse::{Attrs, MacroOpts};
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, Signature, parse_macro_input};

mod parse;

const NO_ASYNC_ERR: &str = "The event handler must not be marked `async`.";
const NO_UNSAFE_ERR: &str = "The event handler must not be marked `unsafe`.";
const WRONG_ARGS_ERR: &str = "The event handler must take three parameters: the `*mut PlaydateAPI` table, the `PDSystemEvent`, and the `u32` argument.";

fn verify_function_sig(sig: &Signature) -> Result<(), syn::Error> {
    let mut error = None;

    if sig.asyncness.is_some() {
        let message = syn::Error::new_spanned(sig, NO_ASYNC_ERR);
        error.replace(message);
    }
    if sig.unsafety.is_some() {
        let message = syn::Error::new_spanned(sig, NO_UNSAFE_ERR);
        match error {
            Some(ref mut e) => e.combine(message),
            None => {
                error.replace(message);
            }
        }
    }
    if sig.inputs.len() != 3 {
        let message = syn::Error::new_spanned(sig, WRONG_ARGS_ERR);
        match error {
            Some(ref mut e) => e.combine(message),
            None => {
                error.replace(message);
            }
        }
    }

    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn make_entrypoint(inner: &ItemFn, opts: &MacroOpts) -> proc_macro2::TokenStream {
    match verify_function_sig(&inner.sig) {
        Ok(()) => {}
        Err(e) => return e.to_compile_error(),
    }
    let inner_ident = inner.sig.ident.clone();
    let symbol = opts.symbol.as_str();

    quote! {
        #[unsafe(export_name = #symbol)]
        unsafe extern "C" fn __pdshim_event_handler(
            playdate: *mut ::pdshim::sys::PlaydateAPI,
            event: ::pdshim::sys::PDSystemEvent,
            arg: u32,
        ) -> ::core::ffi::c_int {
            #inner

            unsafe { ::pdshim::startup::handle_event(playdate, event, arg, #inner_ident) }
        }
    }
}

/// pdshim's event handler macro
///
/// Marks a function as the game's event handler and exports the entry symbol the host calls.
/// Before the function sees any event, the generated entry point captures the host's
/// allocator when the init event arrives, so every allocation the game makes afterwards is
/// served from the host's arena.
///
/// The function must take the capability table, the event and its argument, and return the
/// `c_int` the host expects. It must not be `async` or `unsafe`.
///
/// # Parameters
///
/// - `symbol`: The name the entry point is exported under. Defaults to `eventHandlerShim`.
///
/// # Examples
///
/// ```ignore
/// # #![no_std]
/// use core::ffi::c_int;
/// use pdshim::sys::{PDSystemEvent, PlaydateAPI, kEventInit};
///
/// #[pdshim::event_handler]
/// fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, _arg: u32) -> c_int {
///     if event == kEventInit {
///         pdshim::println!("Hello from the host's heap!");
///     }
///     0
/// }
/// ```
///
/// The entry point can be exported under another name:
///
/// ```ignore
/// #[pdshim::event_handler(symbol = "eventHandler")]
/// fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, arg: u32) -> c_int {
///     0
/// }
/// ```
#[proc_macro_attribute]
pub fn event_handler(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemFn);
    let opts = MacroOpts::from(parse_macro_input!(attrs as Attrs));

    let entrypoint = make_entrypoint(&item, &opts);

    quote! {
        const _: () = {
            #entrypoint
        };
    }
    .into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wraps_event_handler() {
        let source = quote! {
            fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, arg: u32) -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source.clone()).unwrap();
        let output = make_entrypoint(&input, &MacroOpts::default());

        assert_eq!(
            output.to_string(),
            quote! {
                #[unsafe(export_name = "eventHandlerShim")]
                unsafe extern "C" fn __pdshim_event_handler(
                    playdate: *mut ::pdshim::sys::PlaydateAPI,
                    event: ::pdshim::sys::PDSystemEvent,
                    arg: u32,
                ) -> ::core::ffi::c_int {
                    #source

                    unsafe { ::pdshim::startup::handle_event(playdate, event, arg, event_handler) }
                }
            }
            .to_string()
        );
    }

    #[test]
    fn uses_custom_symbol_from_parsed_opts() {
        let source = quote! {
            fn handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, arg: u32) -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source).unwrap();
        let output = make_entrypoint(
            &input,
            &MacroOpts {
                symbol: "eventHandler".to_owned(),
            },
        );

        let output = output.to_string();
        assert!(output.contains("export_name = \"eventHandler\""));
        assert!(!output.contains("eventHandlerShim"));
    }

    #[test]
    fn requires_sync() {
        let source = quote! {
            async fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, arg: u32) -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source).unwrap();
        let output = make_entrypoint(&input, &MacroOpts::default());

        assert!(output.to_string().contains(NO_ASYNC_ERR));
    }

    #[test]
    fn requires_safe() {
        let source = quote! {
            unsafe fn event_handler(playdate: *mut PlaydateAPI, event: PDSystemEvent, arg: u32) -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source).unwrap();
        let output = make_entrypoint(&input, &MacroOpts::default());

        assert!(output.to_string().contains(NO_UNSAFE_ERR));
    }

    #[test]
    fn disallows_0_args() {
        let source = quote! {
            fn event_handler() -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source).unwrap();
        let output = make_entrypoint(&input, &MacroOpts::default());

        assert!(output.to_string().contains(WRONG_ARGS_ERR));
    }

    #[test]
    fn combines_errors() {
        let source = quote! {
            async unsafe fn event_handler(event: PDSystemEvent) -> c_int {
                0
            }
        };

        let input = syn::parse2::<ItemFn>(source).unwrap();
        let output = make_entrypoint(&input, &MacroOpts::default()).to_string();

        assert!(output.contains(NO_ASYNC_ERR));
        assert!(output.contains(NO_UNSAFE_ERR));
        assert!(output.contains(WRONG_ARGS_ERR));
    }
}
