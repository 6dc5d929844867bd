// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{spanned::Spanned, *};

const EXPECTED_KW: &str = "Expected `library`, or `link_name`.";

/// Arguments of `#[native_import(..)]`.
pub struct ImportArgs {
    pub library: syn::Path,
    pub link_name: Option<(String, Span)>,
}

impl TryFrom<Punctuated<Expr, Token!(,)>> for ImportArgs {
    type Error = syn::Error;
    fn try_from(value: Punctuated<Expr, Token!(,)>) -> Result<Self> {
        let mut library: Option<syn::Path> = None;
        let mut link_name: Option<(String, Span)> = None;
        let mut errors = vec![];

        for expr in value.iter() {
            let Expr::Assign(assign) = expr else {
                errors.push(Error::new(expr.span(), EXPECTED_KW));
                continue;
            };
            let Expr::Path(ExprPath { path: key, .. }) = assign.left.as_ref() else {
                errors.push(Error::new(assign.left.span(), EXPECTED_KW));
                continue;
            };
            if key.is_ident("library") {
                // library = <path to a `LazyLibrary` static>
                match assign.right.as_ref() {
                    _ if library.is_some() => {
                        errors.push(Error::new(assign.span(), "library is already defined"))
                    }
                    Expr::Path(ExprPath { path, .. }) => library = Some(path.clone()),
                    right => errors.push(Error::new(right.span(), "Expected path.")),
                }
            } else if key.is_ident("link_name") {
                // link_name = "<exported symbol>"
                match assign.right.as_ref() {
                    _ if link_name.is_some() => {
                        errors.push(Error::new(assign.span(), "link_name is already defined"))
                    }
                    Expr::Lit(ExprLit { lit: Lit::Str(val), .. }) => {
                        link_name = Some((val.value(), assign.span()))
                    }
                    right => errors.push(Error::new(right.span(), "Expected string.")),
                }
            } else {
                errors.push(Error::new(key.span(), EXPECTED_KW));
            }
        }

        if library.is_none() {
            errors.push(Error::new(
                value.span(),
                "No library detected. Suggest using: `library = <path>`.",
            ));
        }

        // combine every error so they are all reported at once.
        let mut errors = errors.into_iter();
        match (errors.next(), library) {
            (Some(mut main_err), _) => {
                for err in errors {
                    main_err.combine(err);
                }
                Err(main_err)
            }
            (None, Some(library)) => Ok(Self { library, link_name }),
            (None, None) => Err(Error::new(value.span(), EXPECTED_KW)),
        }
    }
}
