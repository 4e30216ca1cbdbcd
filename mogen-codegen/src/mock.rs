//! Assembling a mock from a resolved interface.

use mogen_ir::{Interface, Param, Type};

use crate::builder::CodeBuilder;
use crate::error::Result;
use crate::field::{Field, FieldList, call_args, call_args_variadic, zero_value_results};
use crate::function::{FuncGen, Receiver};
use crate::structure::StructGen;

const RECEIVER_VAR: &str = "m";

/// One mock: a struct with a `<Method>Func` hook per interface method, and a
/// method per hook that delegates when the hook is set and returns zero
/// values otherwise.
pub struct MockGen {
    structure: StructGen,
    funcs: Vec<FuncGen>,
}

impl MockGen {
    /// `name` is the mock struct's name; methods come in the interface's own
    /// order (the resolver hands them over sorted).
    pub fn new(name: impl Into<String>, iface: &Interface) -> Result<Self> {
        let name = name.into();
        let mut structure = StructGen::new(&name, FieldList::new());
        let mut funcs = Vec::with_capacity(iface.len());
        for method in iface.methods() {
            let hook = format!("{}Func", method.name);
            structure.add_field(Field::new(
                &hook,
                Type::Func(Box::new(method.sig.clone())),
            ))?;

            let params = param_fields(&method.sig.params, true);
            let results = param_fields(&method.sig.results, false);
            let mut func = FuncGen::new(
                method.name.clone(),
                params,
                results,
                method.sig.variadic,
            );
            func.set_receiver(Receiver {
                type_name: name.clone(),
                var: RECEIVER_VAR.into(),
                by_value: false,
            });
            func.set_body(delegate_body(hook));
            funcs.push(func);
        }
        Ok(Self { structure, funcs })
    }

    pub fn name(&self) -> &str {
        self.structure.name()
    }

    /// Struct first, then a blank line before each method.
    pub fn write_to(&self, out: &mut CodeBuilder) -> Result<()> {
        self.structure.write_to(out)?;
        for func in &self.funcs {
            out.push_blank();
            func.write_to(out)?;
        }
        Ok(())
    }
}

/// Delegation needs a name for every parameter; unnamed ones get positional
/// names. Results keep their source names, empty or not.
fn param_fields(params: &[Param], synthesize_names: bool) -> FieldList {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let name = match &param.name {
                Some(name) => name.clone(),
                None if synthesize_names => format!("arg{i}"),
                None => String::new(),
            };
            Field::new(name, param.ty.clone())
        })
        .collect()
}

/// `if m.XFunc != nil { return m.XFunc(args) }` plus the zero-value return.
fn delegate_body(hook: String) -> impl Fn(&FuncGen, &mut CodeBuilder) -> Result<()> {
    move |func: &FuncGen, out: &mut CodeBuilder| {
        let var = func
            .receiver()
            .map(|r| r.var.clone())
            .unwrap_or_else(|| RECEIVER_VAR.to_owned());
        let args = if func.is_variadic() {
            func.params().format(call_args_variadic)?
        } else {
            func.params().format(call_args)?
        };
        out.push_line(&format!("if {var}.{hook} != nil {{"));
        out.push_line(&format!("return {var}.{hook}{args}"));
        out.push_line("}");
        out.push_line(&func.results().format(zero_value_results)?);
        Ok(())
    }
}
