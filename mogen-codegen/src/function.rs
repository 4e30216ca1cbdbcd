//! Method declaration emission with an injected body strategy.

use crate::builder::CodeBuilder;
use crate::error::{Error, Result};
use crate::field::{
    FieldList, declarative_params, declarative_params_variadic, declarative_results,
};

/// The receiver of an emitted method.
#[derive(Debug, Clone)]
pub struct Receiver {
    pub type_name: String,
    pub var: String,
    pub by_value: bool,
}

/// Emits the statements between a method's braces.
///
/// Blanket-implemented for closures so callers can pass one inline.
pub trait BodyEmitter {
    fn emit(&self, func: &FuncGen, out: &mut CodeBuilder) -> Result<()>;
}

impl<F> BodyEmitter for F
where
    F: Fn(&FuncGen, &mut CodeBuilder) -> Result<()>,
{
    fn emit(&self, func: &FuncGen, out: &mut CodeBuilder) -> Result<()> {
        self(func, out)
    }
}

/// Builds one method declaration.
pub struct FuncGen {
    name: String,
    params: FieldList,
    results: FieldList,
    variadic: bool,
    receiver: Option<Receiver>,
    body: Option<Box<dyn BodyEmitter>>,
}

impl FuncGen {
    pub fn new(
        name: impl Into<String>,
        params: FieldList,
        results: FieldList,
        variadic: bool,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            results,
            variadic,
            receiver: None,
            body: None,
        }
    }

    pub fn set_receiver(&mut self, receiver: Receiver) -> &mut Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn set_body(&mut self, body: impl BodyEmitter + 'static) -> &mut Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &FieldList {
        &self.params
    }

    pub fn results(&self) -> &FieldList {
        &self.results
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn receiver(&self) -> Option<&Receiver> {
        self.receiver.as_ref()
    }

    /// Emits the declaration, unindented. Free functions are not a mock
    /// shape, so a missing receiver is an error.
    pub fn write_to(&self, out: &mut CodeBuilder) -> Result<()> {
        let Some(receiver) = &self.receiver else {
            return Err(Error::UnsupportedReceiver { name: self.name.clone() });
        };
        let params = if self.variadic {
            self.params.format(declarative_params_variadic)?
        } else {
            self.params.format(declarative_params)?
        };
        let results = self.results.format(declarative_results)?;
        let recv_type = if receiver.by_value {
            receiver.type_name.clone()
        } else {
            format!("*{}", receiver.type_name)
        };
        if results.is_empty() {
            out.push_line(&format!(
                "func ({} {}) {}{} {{",
                receiver.var, recv_type, self.name, params
            ));
        } else {
            out.push_line(&format!(
                "func ({} {}) {}{} {} {{",
                receiver.var, recv_type, self.name, params, results
            ));
        }
        if let Some(body) = &self.body {
            body.emit(self, out)?;
        }
        out.push_line("}");
        Ok(())
    }
}

impl std::fmt::Debug for FuncGen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuncGen")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("results", &self.results)
            .field("variadic", &self.variadic)
            .field("receiver", &self.receiver)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use mogen_ir::{BasicKind, Type};

    fn params() -> FieldList {
        vec![
            Field::new("id", Type::Basic(BasicKind::Int64)),
            Field::new("name", Type::Basic(BasicKind::String)),
        ]
        .into_iter()
        .collect()
    }

    fn receiver() -> Receiver {
        Receiver {
            type_name: "User".into(),
            var: "u".into(),
            by_value: false,
        }
    }

    fn render(func: &FuncGen) -> String {
        let mut out = CodeBuilder::new();
        func.write_to(&mut out).unwrap();
        out.build()
    }

    #[test]
    fn no_results() {
        let mut func = FuncGen::new("SetIDName", params(), FieldList::new(), false);
        func.set_receiver(receiver());
        assert_eq!(
            render(&func),
            "func (u *User) SetIDName(id int64, name string) {\n}\n"
        );
    }

    #[test]
    fn single_unnamed_result() {
        let results: FieldList =
            vec![Field::new("", Type::Basic(BasicKind::Bool))].into_iter().collect();
        let mut func = FuncGen::new("SetIDName", params(), results, false);
        func.set_receiver(receiver());
        assert_eq!(
            render(&func),
            "func (u *User) SetIDName(id int64, name string) bool {\n}\n"
        );
    }

    #[test]
    fn multiple_results_are_parenthesized() {
        let results: FieldList = vec![
            Field::new("", Type::Basic(BasicKind::Bool)),
            Field::new("", Type::Basic(BasicKind::Bool)),
        ]
        .into_iter()
        .collect();
        let mut func = FuncGen::new("SetIDName", params(), results, false);
        func.set_receiver(receiver());
        assert_eq!(
            render(&func),
            "func (u *User) SetIDName(id int64, name string) (bool, bool) {\n}\n"
        );
    }

    #[test]
    fn injected_body_runs_between_the_braces() {
        let results: FieldList =
            vec![Field::new("", Type::Basic(BasicKind::Bool))].into_iter().collect();
        let mut func = FuncGen::new("SetIDName", params(), results, false);
        func.set_receiver(receiver());
        func.set_body(|func: &FuncGen, out: &mut CodeBuilder| {
            let var = &func.receiver().unwrap().var;
            out.push_line(&format!("{var}.SetID(id)"));
            out.push_line(&format!("{var}.SetName(name)"));
            out.push_line("return true");
            Ok(())
        });
        assert_eq!(
            render(&func),
            "func (u *User) SetIDName(id int64, name string) bool {\nu.SetID(id)\nu.SetName(name)\nreturn true\n}\n"
        );
    }

    #[test]
    fn value_receiver_drops_the_pointer() {
        let mut func = FuncGen::new("Reset", FieldList::new(), FieldList::new(), false);
        func.set_receiver(Receiver {
            type_name: "Clock".into(),
            var: "c".into(),
            by_value: true,
        });
        assert_eq!(render(&func), "func (c Clock) Reset() {\n}\n");
    }

    #[test]
    fn missing_receiver_is_an_error() {
        let func = FuncGen::new("Orphan", FieldList::new(), FieldList::new(), false);
        let mut out = CodeBuilder::new();
        let err = func.write_to(&mut out).unwrap_err();
        assert!(matches!(err, Error::UnsupportedReceiver { .. }));
    }

    #[test]
    fn variadic_signature_needs_a_slice_tail() {
        let bad: FieldList =
            vec![Field::new("b", Type::Basic(BasicKind::String))].into_iter().collect();
        let mut func = FuncGen::new("Logf", bad, FieldList::new(), true);
        func.set_receiver(receiver());
        let mut out = CodeBuilder::new();
        assert!(matches!(
            func.write_to(&mut out).unwrap_err(),
            Error::InvalidVariadicArgument { .. }
        ));
    }
}
