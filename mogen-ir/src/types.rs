//! The resolved type representation.

/// Predeclared scalar kinds.
///
/// `byte` and `rune` keep their own variants so a type spelled `byte` in the
/// source renders as `byte`, the way `go/types` preserves the spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Byte,
    Rune,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    /// The Go spelling of this kind.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
        }
    }

    /// Look up a predeclared scalar by its spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => BasicKind::Bool,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "byte" => BasicKind::Byte,
            "rune" => BasicKind::Rune,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            "string" => BasicKind::String,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_boolean(self) -> bool {
        self == BasicKind::Bool
    }

    pub fn is_string(self) -> bool {
        self == BasicKind::String
    }

    /// Every non-bool, non-string kind: integers, floats, and complex.
    pub fn is_numeric(self) -> bool {
        !self.is_boolean() && !self.is_string()
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A resolved Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Basic(BasicKind),
    Slice(Box<Type>),
    Array { len: String, elem: Box<Type> },
    Pointer(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(Box<Signature>),
    Struct(Vec<StructField>),
    Interface(crate::Interface),
    Named(Named),
}

/// A named (declared) type, possibly from another package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named {
    /// Rendering qualifier for foreign types: the last segment of the import
    /// path, never the import alias. `None` for package-local and
    /// predeclared names.
    pub qualifier: Option<String>,
    pub name: String,
    pub underlying: Underlying,
}

/// The underlying form of a named type.
///
/// Foreign named types carry `Unknown`: resolving them would need the other
/// package's source, which is out of reach here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Underlying {
    Known(Box<Type>),
    Unknown,
}

/// One field of a struct literal. Embedded fields have no name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: Option<String>,
    pub ty: Type,
    pub tag: Option<String>,
}

/// A function signature: ordered params, ordered results, variadic flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub variadic: bool,
}

/// One parameter or result. The name is `None` when the source leaves it
/// unnamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: Type,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: Type) -> Self {
        Self { name: Some(name.into()), ty }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { name: None, ty }
    }
}

impl Type {
    /// The underlying, unnamed form of this type.
    ///
    /// Structural types are their own underlying form. For named types the
    /// resolver has already chased local definition chains, so a single step
    /// suffices; `None` means the type is a foreign name whose definition is
    /// not available.
    pub fn underlying(&self) -> Option<&Type> {
        match self {
            Type::Named(named) => match &named.underlying {
                Underlying::Known(ty) => Some(ty),
                Underlying::Unknown => None,
            },
            other => Some(other),
        }
    }

    /// Whether the declared form can back a variadic parameter.
    pub fn is_slice_like(&self) -> bool {
        matches!(self, Type::Slice(_) | Type::Array { .. })
    }

    /// The element type of a slice or array.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Slice(elem) => Some(elem),
            Type::Array { elem, .. } => Some(elem),
            _ => None,
        }
    }
}
