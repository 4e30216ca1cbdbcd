//! Rendering resolved types back to Go source text.

use mogen_ir::{BasicKind, ChanDir, Interface, Signature, Type};

/// The Go spelling of a type.
///
/// Arrays render as `[]elem`, the same as slices. Qualified names use the
/// import path's last segment.
pub fn type_string(ty: &Type) -> String {
    match ty {
        Type::Basic(kind) => kind.name().to_owned(),
        Type::Slice(elem) => format!("[]{}", type_string(elem)),
        Type::Array { elem, .. } => format!("[]{}", type_string(elem)),
        Type::Pointer(elem) => format!("*{}", type_string(elem)),
        Type::Map { key, value } => {
            format!("map[{}]{}", type_string(key), type_string(value))
        }
        Type::Chan { dir, elem } => match dir {
            ChanDir::Both => format!("chan {}", type_string(elem)),
            ChanDir::Send => format!("chan<- {}", type_string(elem)),
            ChanDir::Recv => format!("<-chan {}", type_string(elem)),
        },
        Type::Func(sig) => format!("func{}", signature_string(sig)),
        Type::Struct(fields) => {
            let mut parts = Vec::with_capacity(fields.len());
            for field in fields {
                let mut part = match &field.name {
                    Some(name) => format!("{} {}", name, type_string(&field.ty)),
                    None => type_string(&field.ty),
                };
                if let Some(tag) = &field.tag {
                    part.push(' ');
                    part.push_str(&format!("{tag:?}"));
                }
                parts.push(part);
            }
            format!("struct{{{}}}", parts.join("; "))
        }
        Type::Interface(iface) => interface_string(iface),
        Type::Named(named) => match &named.qualifier {
            Some(qualifier) => format!("{}.{}", qualifier, named.name),
            None => named.name.clone(),
        },
    }
}

/// `(params) results`, the part of a func type after the keyword.
pub fn signature_string(sig: &Signature) -> String {
    let mut out = String::from("(");
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let rendered = if sig.variadic && i + 1 == sig.params.len() {
            match param.ty.elem() {
                Some(elem) => format!("...{}", type_string(elem)),
                None => type_string(&param.ty),
            }
        } else {
            type_string(&param.ty)
        };
        match &param.name {
            Some(name) => {
                out.push_str(name);
                out.push(' ');
                out.push_str(&rendered);
            }
            None => out.push_str(&rendered),
        }
    }
    out.push(')');

    match sig.results.len() {
        0 => {}
        1 if sig.results[0].name.is_none() => {
            out.push(' ');
            out.push_str(&type_string(&sig.results[0].ty));
        }
        _ => {
            let results: Vec<String> = sig
                .results
                .iter()
                .map(|r| match &r.name {
                    Some(name) => format!("{} {}", name, type_string(&r.ty)),
                    None => type_string(&r.ty),
                })
                .collect();
            out.push_str(&format!(" ({})", results.join(", ")));
        }
    }
    out
}

fn interface_string(iface: &Interface) -> String {
    if iface.is_empty() {
        return "interface{}".to_owned();
    }
    let methods: Vec<String> = iface
        .methods()
        .iter()
        .map(|m| format!("{}{}", m.name, signature_string(&m.sig)))
        .collect();
    format!("interface{{{}}}", methods.join("; "))
}

/// The zero value expression for a type, decided on its underlying form.
///
/// Foreign named types have no known underlying form and fall through to
/// `nil`; so do arrays, matching `type_string`'s slice conflation.
pub fn zero_value(ty: &Type) -> String {
    match ty.underlying() {
        Some(Type::Basic(kind)) => match kind {
            BasicKind::Bool => "false".to_owned(),
            BasicKind::String => "\"\"".to_owned(),
            _ => "0".to_owned(),
        },
        Some(Type::Struct(_)) => format!("{}{{}}", type_string(ty)),
        _ => "nil".to_owned(),
    }
}
