//! Parsing of `#[entity(...)]` and `#[column(...)]` attributes.

use syn::{Attribute, Error, Lit, LitStr, Path, Result, Token};

/// Options from `#[entity(...)]` on the struct.
#[derive(Default)]
pub(crate) struct EntityAttrs {
    pub(crate) table: Option<LitStr>,
}

impl EntityAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("entity")) {
            attr.parse_nested_meta(|meta| {
                let path_ident = meta
                    .path
                    .get_ident()
                    .ok_or_else(|| Error::new_spanned(&meta.path, "Expected identifier"))?;
                match path_ident.to_string().to_ascii_uppercase().as_str() {
                    "TABLE" | "NAME" => {
                        let lit: LitStr = meta.value()?.parse()?;
                        if lit.value().is_empty() {
                            return Err(Error::new_spanned(lit, "table name cannot be empty"));
                        }
                        parsed.table = Some(lit);
                    }
                    _ => {
                        return Err(Error::new_spanned(
                            &meta.path,
                            "unrecognized entity option, expected `table = \"...\"`",
                        ));
                    }
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

/// Options from `#[column(...)]` on a field.
#[derive(Default)]
pub(crate) struct ColumnAttrs {
    pub(crate) name: Option<LitStr>,
    pub(crate) primary_key: bool,
    pub(crate) unique: bool,
    pub(crate) nullable: bool,
    pub(crate) default_value: Option<String>,
    pub(crate) converter: Option<Path>,
}

impl ColumnAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("column")) {
            attr.parse_nested_meta(|meta| {
                let path_ident = meta
                    .path
                    .get_ident()
                    .ok_or_else(|| Error::new_spanned(&meta.path, "Expected identifier"))?;
                // Case-insensitive, like `PRIMARY_KEY` or `primary_key`
                let path = path_ident.to_string().to_ascii_uppercase();

                match path.as_str() {
                    "NAME" => {
                        let lit: LitStr = meta.value()?.parse()?;
                        if lit.value().is_empty() {
                            return Err(Error::new_spanned(lit, "column name cannot be empty"));
                        }
                        parsed.name = Some(lit);
                    }
                    "PRIMARY" | "PRIMARY_KEY" => parsed.primary_key = true,
                    "UNIQUE" => parsed.unique = true,
                    "NULLABLE" => parsed.nullable = true,
                    "DEFAULT" => {
                        meta.input.parse::<Token![=]>()?;
                        let lit: Lit = meta.input.parse()?;
                        parsed.default_value = Some(default_literal(lit)?);
                    }
                    "CONVERTER" => {
                        let converter: Path = meta.value()?.parse()?;
                        parsed.converter = Some(converter);
                    }
                    _ => {
                        return Err(Error::new_spanned(
                            &meta.path,
                            format!(
                                "unrecognized column option `{path_ident}`, expected one of: \
                                 name, primary_key, unique, nullable, default, converter"
                            ),
                        ));
                    }
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

/// Defaults are carried as raw text and quoted when the DDL is rendered.
fn default_literal(lit: Lit) -> Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(Error::new_spanned(other, "Unsupported default literal type")),
    }
}
