use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant, Visibility};

const REDACTED_ATTR: &str = "redacted";
const INTERNAL_VARIANT: &str = "Internal";

struct VariantSpec {
    ident: Ident,
    source: Option<(Ident, Type)>,
    has_context: bool,
    redacted: bool,
    cfg_attrs: Vec<Attribute>,
}

pub(crate) fn expand(mut input: DeriveInput) -> TokenStream {
    let name = input.ident.clone();
    let ext = format_ident!("{}Ext", name);
    let derives = missing_derives(&input);

    let Data::Enum(data) = &mut input.data else {
        return syn::Error::new_spanned(&name, "ironseal_error can only be applied to enums")
            .to_compile_error();
    };

    let mut specs = Vec::with_capacity(data.variants.len());
    for variant in &mut data.variants {
        match inspect_variant(variant) {
            Ok(spec) => specs.push(spec),
            Err(err) => return err.to_compile_error(),
        }
    }

    let accessors = expand_accessors(&specs);
    let context = expand_context_trait(&name, &ext, &input.vis);
    let conversions = specs.iter().filter_map(|spec| expand_source_conversion(&name, &ext, spec));
    let internal = expand_internal_conversions(&name, &specs);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        impl #name {
            #accessors
        }

        #context
        #(#conversions)*
        #internal

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

/// Collects the variant layout and strips the `#[redacted]` marker so `thiserror` never sees it.
fn inspect_variant(variant: &mut Variant) -> syn::Result<VariantSpec> {
    let redacted = variant.attrs.iter().any(|attr| attr.path().is_ident(REDACTED_ATTR));
    variant.attrs.retain(|attr| !attr.path().is_ident(REDACTED_ATTR));

    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "ironseal_error requires named fields (use `Variant {}` for a variant without data)",
        ));
    };

    let mut has_context = false;
    for field in &fields.named {
        if field.ident.as_ref().is_some_and(|ident| ident == "context") {
            if !is_context_type(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "context field must be Option<Cow<'static, str>>",
                ));
            }
            has_context = true;
        }
    }

    let source = fields
        .named
        .iter()
        .find(|field| is_source_field(field))
        .and_then(|field| field.ident.clone().map(|ident| (ident, field.ty.clone())));

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "variants with a source require `context: Option<Cow<'static, str>>`",
        ));
    }

    if redacted && (has_context || source.is_some()) {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "redacted variants cannot carry a context or a source",
        ));
    }

    Ok(VariantSpec {
        ident: variant.ident.clone(),
        source,
        has_context,
        redacted,
        cfg_attrs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect(),
    })
}

fn expand_accessors(specs: &[VariantSpec]) -> TokenStream {
    let kind_arms = specs.iter().map(|spec| {
        let (cfg, ident) = (&spec.cfg_attrs, &spec.ident);
        let label = ident.to_string();
        quote! { #(#cfg)* Self::#ident { .. } => #label, }
    });

    let redacted_arms = specs.iter().filter(|spec| spec.redacted).map(|spec| {
        let (cfg, ident) = (&spec.cfg_attrs, &spec.ident);
        quote! { #(#cfg)* Self::#ident { .. } => true, }
    });

    let context_arms = specs.iter().filter(|spec| spec.has_context).map(|spec| {
        let (cfg, ident) = (&spec.cfg_attrs, &spec.ident);
        quote! { #(#cfg)* Self::#ident { context, .. } => Some(context), }
    });

    quote! {
        /// Stable variant name, safe to log without exposing any detail of the failure.
        #[must_use]
        pub const fn kind(&self) -> &'static str {
            match self {
                #(#kind_arms)*
            }
        }

        /// Returns `true` for variants that never carry detail beyond their kind.
        #[must_use]
        #[allow(unreachable_patterns)]
        pub const fn is_redacted(&self) -> bool {
            match self {
                #(#redacted_arms)*
                _ => false,
            }
        }

        #[allow(unreachable_patterns)]
        fn context_slot(&mut self) -> Option<&mut Option<std::borrow::Cow<'static, str>>> {
            match self {
                #(#context_arms)*
                _ => None,
            }
        }
    }
}

fn expand_context_trait(name: &Ident, ext: &Ident, vis: &Visibility) -> TokenStream {
    quote! {
        #vis trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    if let Some(slot) = err.context_slot() {
                        *slot = Some(context.into());
                    }
                    err
                })
            }
        }
    }
}

fn expand_source_conversion(name: &Ident, ext: &Ident, spec: &VariantSpec) -> Option<TokenStream> {
    if spec.ident == INTERNAL_VARIANT {
        return None;
    }
    let (field, ty) = spec.source.as_ref()?;
    let (cfg, ident) = (&spec.cfg_attrs, &spec.ident);

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(source: #ty) -> Self {
                Self::#ident { #field: source, context: None }
            }
        }

        #(#cfg)*
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|source| #name::#ident { #field: source, context: Some(context.into()) })
            }
        }
    })
}

fn expand_internal_conversions(name: &Ident, specs: &[VariantSpec]) -> TokenStream {
    let Some(internal) = specs.iter().find(|spec| spec.ident == INTERNAL_VARIANT) else {
        return quote!();
    };
    let cfg = &internal.cfg_attrs;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                present.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { quote!() } else { quote! { #[derive(#(#derives),*)] } }
}

fn is_source_field(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == "source")
        || field.attrs.iter().any(|attr| attr.path().is_ident("source") || attr.path().is_ident("from"))
}

fn is_context_type(ty: &Type) -> bool {
    let rendered: String = quote!(#ty).to_string().chars().filter(|c| !c.is_whitespace()).collect();
    rendered.starts_with("Option<") && rendered.ends_with("Cow<'static,str>>")
}
