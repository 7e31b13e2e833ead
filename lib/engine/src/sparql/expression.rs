use crate::sparql::{EvalContext, Evaluatable, Executable, Scope};
use rdf_algebra_functions::{
    coalesce, effective_boolean_value, evaluate_binary, evaluate_binary_or_ternary,
    evaluate_n_ary, evaluate_nullary, evaluate_ternary, evaluate_ternary_or_quaternary,
    evaluate_unary, in_list, logical_and, logical_not, logical_or, sparql_if, AbsSparqlOp,
    AddSparqlOp, AsBooleanSparqlOp, AsDateTimeSparqlOp, AsDecimalSparqlOp, AsDoubleSparqlOp,
    AsFloatSparqlOp, AsIntegerSparqlOp, AsStringSparqlOp, BNodeSparqlOp, BinarySparqlOp,
    CeilSparqlOp, ConcatSparqlOp, ContainsSparqlOp, DatatypeSparqlOp, DaySparqlOp, DivSparqlOp,
    EncodeForUriSparqlOp, EqualSparqlOp, FloorSparqlOp, GreaterOrEqualSparqlOp,
    GreaterThanSparqlOp, HoursSparqlOp, IriSparqlOp, IsBlankSparqlOp, IsIriSparqlOp,
    IsLiteralSparqlOp, IsNumericSparqlOp, IsTripleSparqlOp, LCaseSparqlOp, LangMatchesSparqlOp,
    LangSparqlOp, LessOrEqualSparqlOp, LessThanSparqlOp, Md5SparqlOp, MinutesSparqlOp,
    MonthSparqlOp, MulSparqlOp, NotEqualSparqlOp, NowSparqlOp, NullarySparqlOp, ObjectSparqlOp,
    PredicateSparqlOp, RandSparqlOp, RegexSparqlOp, ReplaceSparqlOp, RoundSparqlOp,
    SameTermSparqlOp, SecondsSparqlOp, Sha1SparqlOp, Sha256SparqlOp, Sha384SparqlOp,
    Sha512SparqlOp, StrAfterSparqlOp, StrBeforeSparqlOp, StrDtSparqlOp, StrEndsSparqlOp,
    StrLangSparqlOp, StrLenSparqlOp, StrSparqlOp, StrStartsSparqlOp, StrUuidSparqlOp,
    SubStrSparqlOp, SubSparqlOp, SubjectSparqlOp, TernarySparqlOp, TimezoneSparqlOp,
    TripleSparqlOp, TzSparqlOp, UCaseSparqlOp, UnaryMinusSparqlOp, UnaryPlusSparqlOp,
    UnarySparqlOp, UuidSparqlOp, YearSparqlOp,
};
use rdf_algebra_logical::{Expression, GraphPattern, OperatorKind};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{EvalError, EvalResult, Literal, NamedNode, Solution, Term, Variable};

impl Evaluatable for Expression {
    fn evaluate(
        &self,
        solution: &Solution,
        ctx: &EvalContext<'_>,
        scope: &Scope,
    ) -> EvalResult<Term> {
        evaluate_in_row(self, solution, ctx, scope, ctx.bnodes().next_row())
    }
}

/// Evaluates `expression` as part of the row `row`. The expressions of a chain of `Extend`s are
/// evaluated in the same row, such that `BNODE(label)` returns the same blank node in all of them.
pub(crate) fn evaluate_in_row(
    expression: &Expression,
    solution: &Solution,
    ctx: &EvalContext<'_>,
    scope: &Scope,
    row: u64,
) -> EvalResult<Term> {
    ExpressionEvaluator {
        ctx,
        scope,
        solution,
        row,
    }
    .evaluate(expression)
}

/// Evaluates an [Expression] against a single solution.
struct ExpressionEvaluator<'eval, 'ctx> {
    ctx: &'eval EvalContext<'ctx>,
    scope: &'eval Scope,
    solution: &'eval Solution,
    /// The row that `BNODE(label)` creates blank nodes for.
    row: u64,
}

impl ExpressionEvaluator<'_, '_> {
    fn evaluate(&self, expression: &Expression) -> EvalResult<Term> {
        match expression {
            Expression::Term(term) => Ok(term.clone()),
            Expression::Variable(variable) => self
                .lookup(variable)
                .cloned()
                .ok_or_else(|| EvalError::Unbound(variable.clone())),
            Expression::Operation(kind, args) => self.evaluate_operation(*kind, args),
            Expression::Exists(pattern) => self.exists(pattern).map(boolean),
            Expression::Call(function, args) => self.evaluate_call(function, args),
        }
    }

    fn lookup(&self, variable: &Variable) -> Option<&Term> {
        self.solution
            .get(variable)
            .or_else(|| self.scope.substituted(variable))
    }

    fn ebv(&self, expression: &Expression) -> EvalResult<bool> {
        effective_boolean_value(&self.evaluate(expression)?)
    }

    fn evaluate_operation(&self, kind: OperatorKind, args: &[Expression]) -> EvalResult<Term> {
        match kind {
            OperatorKind::Or => match args {
                [lhs, rhs] => logical_or(self.ebv(lhs), self.ebv(rhs)).map(boolean),
                _ => EvalError::expected(),
            },
            OperatorKind::And => match args {
                [lhs, rhs] => logical_and(self.ebv(lhs), self.ebv(rhs)).map(boolean),
                _ => EvalError::expected(),
            },
            OperatorKind::Not => match args {
                [arg] => logical_not(&self.evaluate(arg)?).map(boolean),
                _ => EvalError::expected(),
            },
            OperatorKind::Equal => self.binary(&EqualSparqlOp::new(), args),
            OperatorKind::NotEqual => self.binary(&NotEqualSparqlOp::new(), args),
            OperatorKind::Less => self.binary(&LessThanSparqlOp::new(), args),
            OperatorKind::LessOrEqual => self.binary(&LessOrEqualSparqlOp::new(), args),
            OperatorKind::Greater => self.binary(&GreaterThanSparqlOp::new(), args),
            OperatorKind::GreaterOrEqual => self.binary(&GreaterOrEqualSparqlOp::new(), args),
            OperatorKind::In => self.in_list(args).map(boolean),
            OperatorKind::NotIn => self.in_list(args).map(|found| boolean(!found)),
            OperatorKind::Add => self.binary(&AddSparqlOp::new(), args),
            OperatorKind::Subtract => self.binary(&SubSparqlOp::new(), args),
            OperatorKind::Multiply => self.binary(&MulSparqlOp::new(), args),
            OperatorKind::Divide => self.binary(&DivSparqlOp::new(), args),
            OperatorKind::UnaryPlus => self.unary(&UnaryPlusSparqlOp::new(), args),
            OperatorKind::UnaryMinus => self.unary(&UnaryMinusSparqlOp::new(), args),
            OperatorKind::Bound => match args {
                [Expression::Variable(variable)] => Ok(boolean(self.lookup(variable).is_some())),
                _ => EvalError::expected(),
            },
            OperatorKind::If => match args {
                [condition, then_branch, else_branch] => sparql_if(
                    self.evaluate(condition),
                    || self.evaluate(then_branch),
                    || self.evaluate(else_branch),
                ),
                _ => EvalError::expected(),
            },
            OperatorKind::Coalesce => coalesce(args.iter().map(|arg| self.evaluate(arg))),
            OperatorKind::SameTerm => self.binary(&SameTermSparqlOp::new(), args),
            OperatorKind::Str => self.unary(&StrSparqlOp::new(), args),
            OperatorKind::Lang => self.unary(&LangSparqlOp::new(), args),
            OperatorKind::LangMatches => self.binary(&LangMatchesSparqlOp::new(), args),
            OperatorKind::Datatype => self.unary(&DatatypeSparqlOp::new(), args),
            OperatorKind::Iri => self.unary(&IriSparqlOp::new(self.scope.base_iri.clone()), args),
            OperatorKind::BNode => {
                let op = BNodeSparqlOp::new(self.ctx.bnodes(), self.row);
                match args {
                    [] => evaluate_nullary(&op),
                    [label] => evaluate_unary(&op, &self.evaluate(label)?),
                    _ => EvalError::expected(),
                }
            }
            OperatorKind::StrDt => self.binary(&StrDtSparqlOp::new(), args),
            OperatorKind::StrLang => self.binary(&StrLangSparqlOp::new(), args),
            OperatorKind::Uuid => self.nullary(&UuidSparqlOp::new(), args),
            OperatorKind::StrUuid => self.nullary(&StrUuidSparqlOp::new(), args),
            OperatorKind::IsIri => self.unary(&IsIriSparqlOp::new(), args),
            OperatorKind::IsBlank => self.unary(&IsBlankSparqlOp::new(), args),
            OperatorKind::IsLiteral => self.unary(&IsLiteralSparqlOp::new(), args),
            OperatorKind::IsNumeric => self.unary(&IsNumericSparqlOp::new(), args),
            OperatorKind::IsTriple => self.unary(&IsTripleSparqlOp::new(), args),
            OperatorKind::Triple => self.ternary(&TripleSparqlOp::new(), args),
            OperatorKind::Subject => self.unary(&SubjectSparqlOp::new(), args),
            OperatorKind::Predicate => self.unary(&PredicateSparqlOp::new(), args),
            OperatorKind::Object => self.unary(&ObjectSparqlOp::new(), args),
            OperatorKind::Rand => self.nullary(&RandSparqlOp::new(), args),
            OperatorKind::Abs => self.unary(&AbsSparqlOp::new(), args),
            OperatorKind::Ceil => self.unary(&CeilSparqlOp::new(), args),
            OperatorKind::Floor => self.unary(&FloorSparqlOp::new(), args),
            OperatorKind::Round => self.unary(&RoundSparqlOp::new(), args),
            OperatorKind::Concat => evaluate_n_ary(&ConcatSparqlOp::new(), &self.values(args)?),
            OperatorKind::SubStr => {
                evaluate_binary_or_ternary(&SubStrSparqlOp::new(), &self.values(args)?)
            }
            OperatorKind::StrLen => self.unary(&StrLenSparqlOp::new(), args),
            OperatorKind::Replace => {
                evaluate_ternary_or_quaternary(&ReplaceSparqlOp::new(), &self.values(args)?)
            }
            OperatorKind::UCase => self.unary(&UCaseSparqlOp::new(), args),
            OperatorKind::LCase => self.unary(&LCaseSparqlOp::new(), args),
            OperatorKind::EncodeForUri => self.unary(&EncodeForUriSparqlOp::new(), args),
            OperatorKind::Contains => self.binary(&ContainsSparqlOp::new(), args),
            OperatorKind::StrStarts => self.binary(&StrStartsSparqlOp::new(), args),
            OperatorKind::StrEnds => self.binary(&StrEndsSparqlOp::new(), args),
            OperatorKind::StrBefore => self.binary(&StrBeforeSparqlOp::new(), args),
            OperatorKind::StrAfter => self.binary(&StrAfterSparqlOp::new(), args),
            OperatorKind::Regex => {
                evaluate_binary_or_ternary(&RegexSparqlOp::new(), &self.values(args)?)
            }
            OperatorKind::Year => self.unary(&YearSparqlOp::new(), args),
            OperatorKind::Month => self.unary(&MonthSparqlOp::new(), args),
            OperatorKind::Day => self.unary(&DaySparqlOp::new(), args),
            OperatorKind::Hours => self.unary(&HoursSparqlOp::new(), args),
            OperatorKind::Minutes => self.unary(&MinutesSparqlOp::new(), args),
            OperatorKind::Seconds => self.unary(&SecondsSparqlOp::new(), args),
            OperatorKind::Timezone => self.unary(&TimezoneSparqlOp::new(), args),
            OperatorKind::Tz => self.unary(&TzSparqlOp::new(), args),
            OperatorKind::Now => self.nullary(&NowSparqlOp::new(self.ctx.now()), args),
            OperatorKind::Md5 => self.unary(&Md5SparqlOp::new(), args),
            OperatorKind::Sha1 => self.unary(&Sha1SparqlOp::new(), args),
            OperatorKind::Sha256 => self.unary(&Sha256SparqlOp::new(), args),
            OperatorKind::Sha384 => self.unary(&Sha384SparqlOp::new(), args),
            OperatorKind::Sha512 => self.unary(&Sha512SparqlOp::new(), args),
            _ => Err(EvalError::UnsupportedFunction(kind.name().to_owned())),
        }
    }

    /// Functions that are identified by an IRI. These are the XSD constructor casts.
    fn evaluate_call(&self, function: &NamedNode, args: &[Expression]) -> EvalResult<Term> {
        let function_ref = function.as_ref();
        if function_ref == xsd::STRING {
            self.unary(&AsStringSparqlOp::new(), args)
        } else if function_ref == xsd::BOOLEAN {
            self.unary(&AsBooleanSparqlOp::new(), args)
        } else if function_ref == xsd::INTEGER {
            self.unary(&AsIntegerSparqlOp::new(), args)
        } else if function_ref == xsd::DECIMAL {
            self.unary(&AsDecimalSparqlOp::new(), args)
        } else if function_ref == xsd::FLOAT {
            self.unary(&AsFloatSparqlOp::new(), args)
        } else if function_ref == xsd::DOUBLE {
            self.unary(&AsDoubleSparqlOp::new(), args)
        } else if function_ref == xsd::DATE_TIME {
            self.unary(&AsDateTimeSparqlOp::new(), args)
        } else {
            Err(EvalError::UnsupportedFunction(function.as_str().to_owned()))
        }
    }

    /// `IN` defers the errors of the list elements until it is clear that no element matches.
    fn in_list(&self, args: &[Expression]) -> EvalResult<bool> {
        match args {
            [value, list @ ..] => in_list(
                &self.evaluate(value)?,
                list.iter().map(|element| self.evaluate(element)),
            ),
            [] => EvalError::expected(),
        }
    }

    /// Evaluates the pattern of an `EXISTS` with the current solution substituted.
    ///
    /// Errors of the pattern are not row-scoped. They are recorded in the context and abort the
    /// execution once control returns to the enclosing operator.
    fn exists(&self, pattern: &GraphPattern) -> EvalResult<bool> {
        let mut substitution = self.scope.substitution.clone().unwrap_or_default();
        for (variable, term) in self.solution {
            substitution.insert(variable.clone(), term.clone());
        }
        let scope = Scope {
            substitution: Some(substitution),
            ..self.scope.clone()
        };

        match pattern.execute(self.ctx, &scope) {
            Ok(solutions) => Ok(!solutions.is_empty()),
            Err(error) => {
                self.ctx.record_fatal(error);
                EvalError::expected()
            }
        }
    }

    fn values(&self, args: &[Expression]) -> EvalResult<Vec<Term>> {
        args.iter().map(|arg| self.evaluate(arg)).collect()
    }

    fn nullary<Op: NullarySparqlOp>(&self, op: &Op, args: &[Expression]) -> EvalResult<Term> {
        match args {
            [] => evaluate_nullary(op),
            _ => EvalError::expected(),
        }
    }

    fn unary<Op: UnarySparqlOp>(&self, op: &Op, args: &[Expression]) -> EvalResult<Term> {
        match args {
            [arg] => evaluate_unary(op, &self.evaluate(arg)?),
            _ => EvalError::expected(),
        }
    }

    fn binary<Op: BinarySparqlOp>(&self, op: &Op, args: &[Expression]) -> EvalResult<Term> {
        match args {
            [lhs, rhs] => evaluate_binary(op, &self.evaluate(lhs)?, &self.evaluate(rhs)?),
            _ => EvalError::expected(),
        }
    }

    fn ternary<Op: TernarySparqlOp>(&self, op: &Op, args: &[Expression]) -> EvalResult<Term> {
        match args {
            [arg0, arg1, arg2] => evaluate_ternary(
                op,
                &self.evaluate(arg0)?,
                &self.evaluate(arg1)?,
                &self.evaluate(arg2)?,
            ),
            _ => EvalError::expected(),
        }
    }
}

fn boolean(value: bool) -> Term {
    Literal::from(value).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::EvalContext;
    use crate::test_store::TestStore;
    use crate::ExecutionOptions;
    use rdf_algebra_model::Double;

    fn evaluate(expression: &str) -> EvalResult<Term> {
        evaluate_with(expression, &Solution::new())
    }

    fn evaluate_with(expression: &str, solution: &Solution) -> EvalResult<Term> {
        let store = TestStore::default();
        let options = ExecutionOptions::default();
        let ctx = EvalContext::new(&store, &options);
        let expression: Expression = expression.parse().unwrap();
        expression.evaluate(solution, &ctx, &ctx.root_scope())
    }

    #[test]
    fn integer_division_by_zero() {
        assert_eq!(evaluate("(/ 1 0)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn double_division_by_zero_is_nan() {
        let Ok(Term::Literal(result)) = evaluate(r#"(/ 1 "0.0"^^<http://www.w3.org/2001/XMLSchema#double>)"#) else {
            panic!("expected a literal");
        };
        assert_eq!(result.datatype(), xsd::DOUBLE);
        let value: Double = result.value().parse().unwrap();
        assert!(f64::from(value).is_nan());
    }

    #[test]
    fn or_masks_errors() {
        assert_eq!(evaluate("(|| ?unbound true)"), Ok(boolean(true)));
        assert_eq!(evaluate("(&& ?unbound false)"), Ok(boolean(false)));
        assert_eq!(
            evaluate("(&& ?unbound true)"),
            Err(EvalError::Unbound(Variable::new_unchecked("unbound")))
        );
    }

    #[test]
    fn coalesce_skips_errors() {
        insta::assert_snapshot!(evaluate("(coalesce ?x (/ 1 0) \"a\")").unwrap(), @r#""a""#);
    }

    #[test]
    fn in_defers_errors() {
        assert_eq!(evaluate("(in 1 ?x 1)"), Ok(boolean(true)));
        assert!(evaluate("(in 1 ?x 2)").is_err());
        assert_eq!(evaluate("(notin 1 2 3)"), Ok(boolean(true)));
    }

    #[test]
    fn bound_uses_solution() {
        let solution: Solution = [(Variable::new_unchecked("x"), boolean(true))]
            .into_iter()
            .collect();
        assert_eq!(evaluate_with("(bound ?x)", &solution), Ok(boolean(true)));
        assert_eq!(evaluate_with("(bound ?y)", &solution), Ok(boolean(false)));
    }

    #[test]
    fn strict_comparison_of_incomparable_terms() {
        assert_eq!(evaluate("(< 1 \"a\")"), Err(EvalError::TypeError));
    }

    #[test]
    fn casts() {
        insta::assert_snapshot!(
            evaluate("(call <http://www.w3.org/2001/XMLSchema#integer> \"42\")").unwrap(),
            @r#""42"^^<http://www.w3.org/2001/XMLSchema#integer>"#
        );
        assert_eq!(
            evaluate("(call <http://example.com/unknown> 1)"),
            Err(EvalError::UnsupportedFunction("http://example.com/unknown".to_owned()))
        );
    }

    #[test]
    fn bnode_is_stable_within_solution() {
        let store = TestStore::default();
        let options = ExecutionOptions::default();
        let ctx = EvalContext::new(&store, &options);
        let expression: Expression = "(sameTerm (bnode \"a\") (bnode \"a\"))".parse().unwrap();
        assert_eq!(
            expression.evaluate(&Solution::new(), &ctx, &ctx.root_scope()),
            Ok(boolean(true))
        );
    }

    #[test]
    fn bnode_is_stable_across_bindings_of_a_row() {
        let store = TestStore::default();
        let options = ExecutionOptions::default();
        let ctx = EvalContext::new(&store, &options);
        let pattern: GraphPattern =
            r#"(extend ((?b1 (bnode "a")) (?b2 (bnode "a")) (?c (bnode "c"))) (bgp))"#
                .parse()
                .unwrap();
        let solutions = pattern.execute(&ctx, &ctx.root_scope()).unwrap();
        let solution = solutions.iter().next().unwrap();
        let get = |name: &str| solution.get(&Variable::new_unchecked(name)).unwrap();
        assert!(get("b1").is_blank_node());
        assert_eq!(get("b1"), get("b2"));
        assert_ne!(get("b1"), get("c"));
    }
}
