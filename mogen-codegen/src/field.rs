//! Fields, field lists, and the pluggable formatting strategies.

use mogen_ir::Type;

use crate::error::{Error, Result};
use crate::types::{type_string, zero_value};

/// A named slot in a struct, parameter list, or result list.
///
/// The name may be empty; identity for duplicate detection is the non-empty
/// name only.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    ty: Type,
    tag: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, tag: None }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// `name type`, or just the type when unnamed.
    pub fn decl(&self) -> String {
        if self.name.is_empty() {
            type_string(&self.ty)
        } else {
            format!("{} {}", self.name, type_string(&self.ty))
        }
    }
}

/// A formatting strategy over a field list.
pub type Formatter = fn(&FieldList) -> Result<String>;

/// An ordered list of fields.
#[derive(Debug, Clone, Default)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn last(&self) -> Option<&Field> {
        self.fields.last()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        !name.is_empty() && self.fields.iter().any(|f| f.name == name)
    }

    /// Fails when two fields share a non-empty name.
    pub fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                continue;
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::DuplicateFieldName { name: field.name.clone() });
            }
        }
        Ok(())
    }

    pub fn format(&self, formatter: Formatter) -> Result<String> {
        formatter(self)
    }
}

impl FromIterator<Field> for FieldList {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// `(a int64, b string)`; empty list renders `()`.
pub fn declarative_params(fl: &FieldList) -> Result<String> {
    let parts: Vec<String> = fl.iter().map(Field::decl).collect();
    Ok(format!("({})", parts.join(", ")))
}

/// Like [`declarative_params`] but the final field renders `b ...string`.
///
/// The final field's declared type must be slice-shaped; the ellipsis form
/// has nothing to mean otherwise.
pub fn declarative_params_variadic(fl: &FieldList) -> Result<String> {
    let Some(last) = fl.last() else {
        return Err(Error::InvalidVariadicArgument { name: String::new() });
    };
    let Some(elem) = last.ty().elem() else {
        return Err(Error::InvalidVariadicArgument { name: last.name().to_owned() });
    };
    let mut parts: Vec<String> = fl
        .iter()
        .take(fl.len() - 1)
        .map(Field::decl)
        .collect();
    let elem = type_string(elem);
    if last.name().is_empty() {
        parts.push(format!("...{elem}"));
    } else {
        parts.push(format!("{} ...{elem}", last.name()));
    }
    Ok(format!("({})", parts.join(", ")))
}

/// Result position: empty renders ``, a single unnamed result renders the
/// bare type, anything else is parenthesized.
pub fn declarative_results(fl: &FieldList) -> Result<String> {
    match fl.len() {
        0 => Ok(String::new()),
        1 if fl.last().is_some_and(|f| f.name().is_empty()) => {
            Ok(type_string(fl.last().unwrap().ty()))
        }
        _ => declarative_params(fl),
    }
}

/// Call-site arguments: `(a, b)`.
pub fn call_args(fl: &FieldList) -> Result<String> {
    let names: Vec<&str> = fl.iter().map(Field::name).collect();
    Ok(format!("({})", names.join(", ")))
}

/// Call-site arguments with the final slice-shaped argument expanded:
/// `(a, b...)`. A non-slice final argument is forwarded plainly.
pub fn call_args_variadic(fl: &FieldList) -> Result<String> {
    let mut names: Vec<String> = fl.iter().map(|f| f.name().to_owned()).collect();
    if let (Some(last), Some(field)) = (names.last_mut(), fl.last())
        && field.ty().is_slice_like()
    {
        last.push_str("...");
    }
    Ok(format!("({})", names.join(", ")))
}

/// `return z1, z2`; an empty list yields exactly `return`.
pub fn zero_value_results(fl: &FieldList) -> Result<String> {
    if fl.is_empty() {
        return Ok("return".to_owned());
    }
    let zeros: Vec<String> = fl.iter().map(|f| zero_value(f.ty())).collect();
    Ok(format!("return {}", zeros.join(", ")))
}
