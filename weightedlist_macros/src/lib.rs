use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, parse_macro_input, spanned::Spanned};

/// Variant attribute: #[weight(<integer expr>)]
#[proc_macro_derive(WeightedEnum, attributes(weight))]
pub fn derive_weighted_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(
            input.ident.span(),
            "WeightedEnum can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    let mut entries = Vec::new();

    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(variant.span(), "WeightedEnum only supports fieldless variants")
                .to_compile_error()
                .into();
        }

        let weight_expr = match weight_of(variant.span(), &variant.attrs) {
            Ok(e) => e,
            Err(err) => return err.to_compile_error().into(),
        };
        if let Err(err) = reject_float_literals(&weight_expr) {
            return err.to_compile_error().into();
        }

        let ident = &variant.ident;
        entries.push(quote! { (Self::#ident, (#weight_expr)) });
    }

    let expanded = quote! {
        impl weightedlist::WeightedEnum for #enum_ident {
            const ENTRIES: &'static [(Self, i32)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Build a `WeightedList<Self>` from the annotated weights.
            pub fn weighted_list(seed: u32, state: u32) -> weightedlist::WeightedList<Self>
            where
                Self: Copy
            {
                <Self as weightedlist::WeightedEnum>::weighted_list(seed, state)
            }
        }
    };

    expanded.into()
}

/// Find the single `#[weight(...)]` on a variant and parse its contents.
fn weight_of(span: proc_macro2::Span, attrs: &[Attribute]) -> syn::Result<Expr> {
    let mut found = None;
    for Attribute { meta, .. } in attrs {
        if !meta.path().is_ident("weight") {
            continue;
        }
        let syn::Meta::List(list) = meta else {
            return Err(syn::Error::new(meta.span(), "use #[weight(<integer expr>)]"));
        };
        if found.is_some() {
            return Err(syn::Error::new(list.span(), "duplicate #[weight(...)]"));
        }
        let expr = syn::parse2::<Expr>(list.tokens.clone())
            .map_err(|e| syn::Error::new(list.span(), format!("invalid weight expr: {e}")))?;
        found = Some(expr);
    }
    found.ok_or_else(|| syn::Error::new(span, "missing #[weight(...)] on variant"))
}

/// Weights are integers; point at any float literal inside the expression.
fn reject_float_literals(e: &Expr) -> syn::Result<()> {
    match e {
        Expr::Lit(el) => match &el.lit {
            Lit::Float(f) => Err(syn::Error::new(
                f.span(),
                "weights are integers; drop the fractional part",
            )),
            _ => Ok(()),
        },
        Expr::Binary(b) => {
            reject_float_literals(&b.left)?;
            reject_float_literals(&b.right)
        }
        Expr::Paren(p) => reject_float_literals(&p.expr),
        Expr::Unary(u) => reject_float_literals(&u.expr),
        Expr::Group(g) => reject_float_literals(&g.expr),
        _ => Ok(()),
    }
}
