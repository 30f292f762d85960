//! FromRow derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, Type};

/// A struct field and the column it is read from
struct ColumnField {
    ident: Ident,
    column: String,
    ty: Type,
}

impl ColumnField {
    fn parse(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "tuple structs are not supported"))?;

        let mut column = ident.to_string();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("dynmodels")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    column = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unknown dynmodels attribute, expected `rename`"))
                }
            })?;
        }

        Ok(Self {
            ident,
            column,
            ty: field.ty.clone(),
        })
    }
}

pub fn derive_from_row_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(Error::new(input.span(), "only named fields are supported")),
        },
        _ => return Err(Error::new(input.span(), "only structs are supported")),
    };

    let columns = fields
        .iter()
        .map(ColumnField::parse)
        .collect::<Result<Vec<_>>>()?;

    let extractions = columns.iter().map(|c| {
        let ident = &c.ident;
        let column = &c.column;
        let ty = &c.ty;
        quote! {
            #ident: dynmodels::RowExt::get::<#ty>(row, #column)?
        }
    });
    let column_names = columns.iter().map(|c| c.column.as_str());

    Ok(quote! {
        impl #impl_generics dynmodels::FromRow for #name #ty_generics #where_clause {
            fn from_row<R: dynmodels::Row>(row: &R) -> dynmodels::Result<Self> {
                Ok(Self {
                    #(#extractions),*
                })
            }

            fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }
        }
    })
}
