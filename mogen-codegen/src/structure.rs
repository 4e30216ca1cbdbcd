//! Struct declaration emission.

use crate::builder::CodeBuilder;
use crate::error::{Error, Result};
use crate::field::{Field, FieldList};

/// Builds a `type Name struct { ... }` declaration.
#[derive(Debug, Clone)]
pub struct StructGen {
    name: String,
    fields: FieldList,
}

impl StructGen {
    pub fn new(name: impl Into<String>, fields: FieldList) -> Self {
        Self { name: name.into(), fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Appends a field. The duplicate check runs before the append, so a
    /// rejected field leaves the list untouched.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if self.fields.contains_name(field.name()) {
            return Err(Error::DuplicateFieldName { name: field.name().to_owned() });
        }
        self.fields.add(field);
        self.fields.validate()
    }

    /// Emits the declaration, unindented; the file-level format pass owns
    /// indentation.
    pub fn write_to(&self, out: &mut CodeBuilder) -> Result<()> {
        out.push_line(&format!("type {} struct {{", self.name));
        for field in self.fields.iter() {
            out.push_line(&field.decl());
        }
        out.push_line("}");
        Ok(())
    }
}
