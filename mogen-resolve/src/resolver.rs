//! Lowering parsed declarations into the resolved type model.

use indexmap::IndexMap;
use mogen_ir as ir;
use mogen_syntax::{
    FuncTypeExpr, Ident, InterfaceTypeExpr, TypeDecl, TypeExpr, TypeExprKind,
};

use crate::error::{ResolveError, Result};
use crate::loader::Package;

/// Resolves type expressions against the loaded package's declarations.
///
/// Resolution is package-local: imported packages contribute only their
/// qualifier, never their definitions.
pub struct Resolver {
    pkg: Package,
    decls: IndexMap<String, DeclSite>,
}

struct DeclSite {
    file: usize,
    decl: TypeDecl,
}

impl Resolver {
    pub fn new(pkg: Package) -> Result<Self> {
        let mut decls: IndexMap<String, DeclSite> = IndexMap::new();
        for (file, source) in pkg.files.iter().enumerate() {
            for decl in &source.ast.decls {
                let name = decl.name.name.clone();
                if decls.contains_key(&name) {
                    return Err(Box::new(ResolveError::DuplicateType {
                        name,
                        src: source.named_source(),
                        span: decl.name.span.into(),
                    }));
                }
                decls.insert(name, DeclSite { file, decl: decl.clone() });
            }
        }
        Ok(Self { pkg, decls })
    }

    pub fn package_name(&self) -> &str {
        &self.pkg.name
    }

    /// Import paths across all files, first-seen order, deduplicated. Blank
    /// imports are side-effect only and never referenced, so they are left
    /// out.
    pub fn import_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for file in &self.pkg.files {
            for import in &file.ast.imports {
                if import.local_name() == "_" {
                    continue;
                }
                if !paths.iter().any(|p| p == &import.path) {
                    paths.push(import.path.clone());
                }
            }
        }
        paths
    }

    /// Interface Discovery: every exported interface type declaration, in
    /// declaration order across files, flattened and with its methods sorted
    /// by name. Unexported and non-interface declarations are skipped
    /// silently.
    pub fn discover(&self) -> Result<Vec<(String, ir::Interface)>> {
        let mut out = Vec::new();
        for (file, source) in self.pkg.files.iter().enumerate() {
            for decl in &source.ast.decls {
                if !decl.name.is_exported() {
                    continue;
                }
                let TypeExprKind::Interface(body) = &decl.ty.kind else {
                    continue;
                };
                let mut seen = vec![decl.name.name.clone()];
                let iface = self.flatten_interface(file, body, &mut seen)?;
                out.push((decl.name.name.clone(), iface));
            }
        }
        Ok(out)
    }

    fn lower_type(
        &self,
        file: usize,
        expr: &TypeExpr,
        seen: &mut Vec<String>,
    ) -> Result<ir::Type> {
        let ty = match &expr.kind {
            TypeExprKind::Ident(ident) => return self.lower_ident(file, ident, seen),
            TypeExprKind::Selector { pkg, name } => {
                let qualifier = self.qualifier_for(file, pkg)?;
                ir::Type::Named(ir::Named {
                    qualifier: Some(qualifier),
                    name: name.name.clone(),
                    underlying: ir::Underlying::Unknown,
                })
            }
            TypeExprKind::Slice(elem) => {
                ir::Type::Slice(Box::new(self.lower_type(file, elem, seen)?))
            }
            TypeExprKind::Array { len, elem } => ir::Type::Array {
                len: len.clone(),
                elem: Box::new(self.lower_type(file, elem, seen)?),
            },
            TypeExprKind::Pointer(elem) => {
                ir::Type::Pointer(Box::new(self.lower_type(file, elem, seen)?))
            }
            TypeExprKind::Map { key, value } => ir::Type::Map {
                key: Box::new(self.lower_type(file, key, seen)?),
                value: Box::new(self.lower_type(file, value, seen)?),
            },
            TypeExprKind::Chan { dir, elem } => ir::Type::Chan {
                dir: match dir {
                    mogen_syntax::ChanDir::Both => ir::ChanDir::Both,
                    mogen_syntax::ChanDir::Send => ir::ChanDir::Send,
                    mogen_syntax::ChanDir::Recv => ir::ChanDir::Recv,
                },
                elem: Box::new(self.lower_type(file, elem, seen)?),
            },
            TypeExprKind::Func(sig) => {
                ir::Type::Func(Box::new(self.lower_signature(file, sig, seen)?))
            }
            TypeExprKind::Struct(fields) => {
                let mut lowered = Vec::with_capacity(fields.len());
                for field in fields {
                    let ty = self.lower_type(file, &field.ty, seen)?;
                    if field.names.is_empty() {
                        lowered.push(ir::StructField {
                            name: None,
                            ty,
                            tag: field.tag.clone(),
                        });
                    } else {
                        for name in &field.names {
                            lowered.push(ir::StructField {
                                name: Some(name.name.clone()),
                                ty: ty.clone(),
                                tag: field.tag.clone(),
                            });
                        }
                    }
                }
                ir::Type::Struct(lowered)
            }
            TypeExprKind::Interface(body) => {
                ir::Type::Interface(self.flatten_interface(file, body, seen)?)
            }
        };
        Ok(ty)
    }

    fn lower_ident(
        &self,
        file: usize,
        ident: &Ident,
        seen: &mut Vec<String>,
    ) -> Result<ir::Type> {
        if let Some(kind) = ir::BasicKind::from_name(&ident.name) {
            return Ok(ir::Type::Basic(kind));
        }
        match ident.name.as_str() {
            "error" => return Ok(predeclared_error()),
            "any" => {
                return Ok(ir::Type::Named(ir::Named {
                    qualifier: None,
                    name: "any".into(),
                    underlying: ir::Underlying::Known(Box::new(ir::Type::Interface(
                        ir::Interface::default(),
                    ))),
                }));
            }
            _ => {}
        }
        let Some(site) = self.decls.get(&ident.name) else {
            return Err(Box::new(ResolveError::UnknownType {
                name: ident.name.clone(),
                src: self.pkg.files[file].named_source(),
                span: ident.span.into(),
            }));
        };
        if seen.iter().any(|n| n == &ident.name) {
            // A back-reference inside a composite or signature, like
            // `type Node struct { next *Node }` or a method returning its
            // own interface. The name alone renders fine and its zero value
            // never needs the underlying form, so the cycle is cut here.
            return Ok(ir::Type::Named(ir::Named {
                qualifier: None,
                name: ident.name.clone(),
                underlying: ir::Underlying::Unknown,
            }));
        }
        if self.direct_definition_cycle(&ident.name) {
            return Err(Box::new(ResolveError::RecursiveType {
                name: ident.name.clone(),
                src: self.pkg.files[file].named_source(),
                span: ident.span.into(),
            }));
        }
        seen.push(ident.name.clone());
        let lowered = self.lower_type(site.file, &site.decl.ty, seen)?;
        seen.pop();
        let underlying = match lowered {
            ir::Type::Named(named) => named.underlying,
            structural => ir::Underlying::Known(Box::new(structural)),
        };
        Ok(ir::Type::Named(ir::Named {
            qualifier: None,
            name: ident.name.clone(),
            underlying,
        }))
    }

    fn lower_signature(
        &self,
        file: usize,
        sig: &FuncTypeExpr,
        seen: &mut Vec<String>,
    ) -> Result<ir::Signature> {
        let mut params = Vec::with_capacity(sig.params.len());
        for (i, param) in sig.params.iter().enumerate() {
            let mut ty = self.lower_type(file, &param.ty, seen)?;
            // `b ...T` is declared as a []T parameter.
            if sig.variadic && i + 1 == sig.params.len() {
                ty = ir::Type::Slice(Box::new(ty));
            }
            params.push(ir::Param {
                name: param.name.as_ref().map(|n| n.name.clone()),
                ty,
            });
        }
        let mut results = Vec::with_capacity(sig.results.len());
        for result in &sig.results {
            results.push(ir::Param {
                name: result.name.as_ref().map(|n| n.name.clone()),
                ty: self.lower_type(file, &result.ty, seen)?,
            });
        }
        Ok(ir::Signature { params, results, variadic: sig.variadic })
    }

    fn flatten_interface(
        &self,
        file: usize,
        body: &InterfaceTypeExpr,
        seen: &mut Vec<String>,
    ) -> Result<ir::Interface> {
        let mut methods: IndexMap<String, ir::Method> = IndexMap::new();
        for method in &body.methods {
            let sig = self.lower_signature(file, &method.sig, seen)?;
            if methods.contains_key(&method.name.name) {
                return Err(Box::new(ResolveError::DuplicateMethod {
                    name: method.name.name.clone(),
                    src: self.pkg.files[file].named_source(),
                    span: method.span.into(),
                }));
            }
            methods.insert(method.name.name.clone(), ir::Method::new(&method.name.name, sig));
        }

        for embedded in &body.embedded {
            match &embedded.kind {
                TypeExprKind::Selector { pkg, name } => {
                    return Err(Box::new(ResolveError::UnresolvedEmbedding {
                        name: format!("{}.{}", pkg.name, name.name),
                        src: self.pkg.files[file].named_source(),
                        span: embedded.span.into(),
                    }));
                }
                TypeExprKind::Ident(ident) => {
                    let lowered = self.lower_type(file, embedded, seen)?;
                    let Some(ir::Type::Interface(iface)) = lowered.underlying() else {
                        return Err(Box::new(ResolveError::EmbeddedNotInterface {
                            name: ident.name.clone(),
                            src: self.pkg.files[file].named_source(),
                            span: embedded.span.into(),
                        }));
                    };
                    for method in iface.methods() {
                        match methods.get(&method.name) {
                            // Identical methods reached through several
                            // embeddings are allowed.
                            Some(existing) if existing == method => {}
                            Some(_) => {
                                return Err(Box::new(ResolveError::DuplicateMethod {
                                    name: method.name.clone(),
                                    src: self.pkg.files[file].named_source(),
                                    span: embedded.span.into(),
                                }));
                            }
                            None => {
                                methods.insert(method.name.clone(), method.clone());
                            }
                        }
                    }
                }
                _ => {
                    return Err(Box::new(ResolveError::EmbeddedNotInterface {
                        name: "<type>".into(),
                        src: self.pkg.files[file].named_source(),
                        span: embedded.span.into(),
                    }));
                }
            }
        }

        let mut flattened: Vec<ir::Method> = methods.into_values().collect();
        flattened.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ir::Interface::new(flattened))
    }

    /// Whether the pure-definition chain starting at `start` (`type A B`
    /// steps only) comes back around. These chains have no underlying type
    /// at all, unlike recursion guarded by a pointer, slice, or signature.
    fn direct_definition_cycle(&self, start: &str) -> bool {
        let mut visited: Vec<&str> = vec![start];
        let mut current = start;
        loop {
            let Some(site) = self.decls.get(current) else {
                return false;
            };
            let TypeExprKind::Ident(next) = &site.decl.ty.kind else {
                return false;
            };
            if visited.iter().any(|n| *n == next.name.as_str()) {
                return true;
            }
            visited.push(&next.name);
            current = &next.name;
        }
    }

    fn qualifier_for(&self, file: usize, pkg: &Ident) -> Result<String> {
        let source = &self.pkg.files[file];
        for import in &source.ast.imports {
            if import.local_name() == pkg.name {
                // The rendering qualifier is the path's last segment even
                // when the import is aliased.
                return Ok(import.path_qualifier().to_owned());
            }
        }
        Err(Box::new(ResolveError::UnknownImport {
            name: pkg.name.clone(),
            src: source.named_source(),
            span: pkg.span.into(),
        }))
    }
}

/// The predeclared `error` interface.
fn predeclared_error() -> ir::Type {
    let error_method = ir::Method::new(
        "Error",
        ir::Signature {
            params: Vec::new(),
            results: vec![ir::Param::unnamed(ir::Type::Basic(ir::BasicKind::String))],
            variadic: false,
        },
    );
    ir::Type::Named(ir::Named {
        qualifier: None,
        name: "error".into(),
        underlying: ir::Underlying::Known(Box::new(ir::Type::Interface(ir::Interface::new(
            vec![error_method],
        )))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mogen_ir::{BasicKind, Type, Underlying};

    fn resolver(src: &str) -> Resolver {
        let pkg = Package::from_sources([("test.go", src)]).expect("package");
        Resolver::new(pkg).expect("resolver")
    }

    fn single_interface(src: &str) -> ir::Interface {
        let resolver = resolver(src);
        let mut discovered = resolver.discover().expect("discover");
        assert_eq!(discovered.len(), 1);
        discovered.pop().unwrap().1
    }

    #[test]
    fn discovers_exported_interfaces_only() {
        let resolver = resolver(
            "package util\ntype hidden interface {\n\tM()\n}\ntype User struct {\n\tID int\n}\ntype Greeter interface {\n\tGreet()\n}\ntype Closer interface {\n\tClose() error\n}\n",
        );
        let found = resolver.discover().expect("discover");
        let names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Greeter", "Closer"]);
    }

    #[test]
    fn flattens_embedded_interfaces_alphabetically() {
        let resolver = resolver(
            "package util\ntype Writer interface {\n\tWrite(p []byte) (n int, err error)\n}\ntype Reader interface {\n\tRead(p []byte) (n int, err error)\n}\ntype Buffer interface {\n\tWriter\n\tReader\n\tReset()\n}\n",
        );
        let found = resolver.discover().expect("discover");
        let (_, iface) = found.iter().find(|(name, _)| name == "Buffer").unwrap();
        let names: Vec<_> = iface.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Read", "Reset", "Write"]);
    }

    #[test]
    fn chases_local_named_type_chains() {
        let iface = single_interface(
            "package util\ntype ID int64\ntype UserID ID\ntype Fetcher interface {\n\tFetch() UserID\n}\n",
        );
        let result = &iface.methods()[0].sig.results[0].ty;
        let Type::Named(named) = result else {
            panic!("expected named type, got {result:?}");
        };
        assert_eq!(named.name, "UserID");
        assert_eq!(
            named.underlying,
            Underlying::Known(Box::new(Type::Basic(BasicKind::Int64)))
        );
    }

    #[test]
    fn variadic_parameters_are_slices() {
        let iface = single_interface(
            "package util\ntype Logger interface {\n\tLogf(format string, args ...string)\n}\n",
        );
        let sig = &iface.methods()[0].sig;
        assert!(sig.variadic);
        assert_eq!(
            sig.params[1].ty,
            Type::Slice(Box::new(Type::Basic(BasicKind::String)))
        );
    }

    #[test]
    fn qualified_types_use_the_path_segment_not_the_alias() {
        let iface = single_interface(
            "package util\nimport myhttp \"net/http\"\ntype Doer interface {\n\tDo() myhttp.Client\n}\n",
        );
        let result = &iface.methods()[0].sig.results[0].ty;
        let Type::Named(named) = result else {
            panic!("expected named type");
        };
        assert_eq!(named.qualifier.as_deref(), Some("http"));
        assert_eq!(named.name, "Client");
        assert_eq!(named.underlying, Underlying::Unknown);
    }

    #[test]
    fn embedded_error_contributes_its_method() {
        let iface = single_interface(
            "package util\ntype Failer interface {\n\terror\n\tFail()\n}\n",
        );
        let names: Vec<_> = iface.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Error", "Fail"]);
    }

    #[test]
    fn identical_methods_from_two_embeddings_merge() {
        let resolver = resolver(
            "package util\ntype A interface {\n\tClose() error\n}\ntype B interface {\n\tClose() error\n}\ntype C interface {\n\tA\n\tB\n}\n",
        );
        let found = resolver.discover().expect("discover");
        let (_, iface) = found.iter().find(|(name, _)| name == "C").unwrap();
        assert_eq!(iface.len(), 1);
    }

    #[test]
    fn conflicting_methods_are_rejected() {
        let resolver = resolver(
            "package util\ntype A interface {\n\tClose() error\n}\ntype C interface {\n\tA\n\tClose()\n}\n",
        );
        let err = resolver.discover().unwrap_err();
        assert!(matches!(*err, ResolveError::DuplicateMethod { .. }));
    }

    #[test]
    fn foreign_embedding_is_reported() {
        let resolver = resolver(
            "package util\nimport \"io\"\ntype Buffer interface {\n\tio.Writer\n}\n",
        );
        let err = resolver.discover().unwrap_err();
        match *err {
            ResolveError::UnresolvedEmbedding { name, .. } => assert_eq!(name, "io.Writer"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_referential_interface_resolves() {
        let iface = single_interface(
            "package util\ntype Cloner interface {\n\tClone() Cloner\n}\n",
        );
        let result = &iface.methods()[0].sig.results[0].ty;
        let Type::Named(named) = result else {
            panic!("expected named type, got {result:?}");
        };
        assert_eq!(named.name, "Cloner");
        assert_eq!(named.underlying, Underlying::Unknown);
    }

    #[test]
    fn recursion_through_a_pointer_resolves() {
        let iface = single_interface(
            "package util\ntype Node struct {\n\tnext *Node\n}\ntype Lister interface {\n\tNext(n *Node) *Node\n}\n",
        );
        let result = &iface.methods()[0].sig.results[0].ty;
        let Type::Pointer(inner) = result else {
            panic!("expected pointer type, got {result:?}");
        };
        let Type::Named(named) = &**inner else {
            panic!("expected named element");
        };
        assert_eq!(named.name, "Node");
        // The outer Node keeps its struct underlying; only the inner
        // back-reference is name-only.
        assert!(matches!(named.underlying, Underlying::Known(_)));
    }

    #[test]
    fn recursive_type_chains_are_reported() {
        let resolver = resolver(
            "package util\ntype A B\ntype B A\ntype I interface {\n\tM() A\n}\n",
        );
        let err = resolver.discover().unwrap_err();
        assert!(matches!(*err, ResolveError::RecursiveType { .. }));
    }

    #[test]
    fn unknown_types_are_reported() {
        let resolver =
            resolver("package util\ntype I interface {\n\tM() Missing\n}\n");
        let err = resolver.discover().unwrap_err();
        match *err {
            ResolveError::UnknownType { name, .. } => assert_eq!(name, "Missing"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn import_paths_union_in_first_seen_order() {
        let pkg = Package::from_sources([
            ("a.go", "package util\nimport (\n\t\"io\"\n\t\"fmt\"\n)\n"),
            ("b.go", "package util\nimport (\n\t\"fmt\"\n\t_ \"net/http/pprof\"\n\t\"strings\"\n)\n"),
        ])
        .expect("package");
        let resolver = Resolver::new(pkg).expect("resolver");
        assert_eq!(resolver.import_paths(), ["io", "fmt", "strings"]);
    }
}
