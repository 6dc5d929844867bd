// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use quote::*;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use syn::{parse::Parser, punctuated::Punctuated, spanned::Spanned, Expr, Token};

mod attr_data;
use attr_data::*;

/// Binds every function of an `extern` block to a `LazyLibrary` loaded at run time.
///
/// ```ignore
/// static SDL: sync::LazyLibrary = sync::LazyLibrary::new(&["SDL2.dll", "libSDL2-2.0.so.0"]);
///
/// #[native_import(library = SDL)]
/// extern "C" {
///     fn SDL_GetTicks() -> u32;
/// }
/// ```
///
/// Each function becomes an `unsafe fn` that binds the export on first call and panics
/// if the library or the export cannot be found. `link_name` (or a `#[link_name]`
/// attribute on the function) selects a different export name.
#[proc_macro_attribute]
pub fn native_import(args: TokenStream1, input: TokenStream1) -> TokenStream1 {
    let foreign_mod = syn::parse_macro_input!(input as syn::ItemForeignMod);
    let punct = match Punctuated::<Expr, Token!(,)>::parse_terminated.parse(args) {
        Ok(punct) => punct,
        Err(e) => return e.into_compile_error().into(),
    };
    let args = match ImportArgs::try_from(punct) {
        Ok(args) => args,
        Err(e) => return e.into_compile_error().into(),
    };
    TokenStream1::from(expand(foreign_mod, &args))
}

fn expand(foreign_mod: syn::ItemForeignMod, args: &ImportArgs) -> TokenStream2 {
    let fn_count = foreign_mod
        .items
        .iter()
        .filter(|item| matches!(item, syn::ForeignItem::Fn(_)))
        .count();
    match &args.link_name {
        Some((_, span)) if fn_count > 1 => {
            return syn::Error::new(*span, "`link_name` applies to a single function")
                .into_compile_error();
        }
        _ => (),
    }

    let abi = &foreign_mod.abi;
    let mut ret = TokenStream2::new();
    for item in foreign_mod.items {
        match item {
            syn::ForeignItem::Fn(fn_item) => ret.extend(parse_fn(abi, fn_item, args)),
            other => ret.extend(quote!(#abi {#other})),
        }
    }
    ret
}

// Extracts `#[link_name = "..."]` from the function's own attributes.
fn take_link_name(attrs: &mut Vec<syn::Attribute>) -> syn::Result<Option<String>> {
    let mut link_name = None;
    let mut result = Ok(());
    attrs.retain(|attr| {
        if !attr.path().is_ident("link_name") {
            return true;
        }
        match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(val),
                        ..
                    }),
                ..
            }) => link_name = Some(val.value()),
            meta => result = Err(syn::Error::new(meta.span(), "Expected `link_name = \"...\"`.")),
        }
        false
    });
    result.map(|()| link_name)
}

fn parse_fn(abi: &syn::Abi, mut fn_item: syn::ForeignItemFn, args: &ImportArgs) -> TokenStream2 {
    if let Some(variadic) = &fn_item.sig.variadic {
        return syn::Error::new(variadic.span(), "variadic functions are unsupported")
            .into_compile_error();
    }
    let own_link_name = match take_link_name(&mut fn_item.attrs) {
        Ok(name) => name,
        Err(e) => return e.into_compile_error(),
    };

    let fn_name = &fn_item.sig.ident;
    let link_name = own_link_name
        .or_else(|| args.link_name.as_ref().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| fn_name.to_string());
    let library = &args.library;
    let vis = &fn_item.vis;
    let output = &fn_item.sig.output;
    let fn_attrs = &fn_item.attrs;

    let mut param_list = Vec::new();
    let mut param_ty_list = Vec::new();
    let mut ty_list = Vec::new();
    for (i, arg) in fn_item.sig.inputs.iter().enumerate() {
        match arg {
            syn::FnArg::Typed(pat_type) => {
                let ty = &pat_type.ty;
                let param_name = match pat_type.pat.as_ref() {
                    syn::Pat::Ident(pat_id) => pat_id.ident.clone(),
                    _ => format_ident!("p{i}"),
                };
                param_ty_list.push(quote!(#param_name : #ty));
                param_list.push(param_name);
                ty_list.push(ty);
            }
            syn::FnArg::Receiver(rec) => {
                return syn::Error::new(rec.span(), "`self` arguments are unsupported")
                    .into_compile_error();
            }
        }
    }

    // According to "The Rustonomicon" foreign functions are assumed unsafe,
    // so the wrappers are `unsafe` as well.
    //
    // The static lives inside the wrapper to keep it out of the caller's namespace.
    quote! {
        #(#fn_attrs)*
        #[allow(non_snake_case)]
        #[inline]
        #vis unsafe fn #fn_name (#(#param_ty_list),*) #output {
            // InstFnPtr: instance function pointer type
            type InstFnPtr = unsafe #abi fn (#(#ty_list),*) #output;
            static DYN_FUNC: ::native_loader::sync::LazyFn<InstFnPtr> =
                unsafe { ::native_loader::sync::LazyFn::new(&#library, #link_name) };
            match DYN_FUNC.get() {
                Ok(function) => unsafe { function(#(#param_list),*) },
                Err(err) => panic!("{}", err),
            }
        }
    }
}
