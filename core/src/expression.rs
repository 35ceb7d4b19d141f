//! Predicate and ordering expressions.
//!
//! Expressions are plain values. Building one never fails; rendering can,
//! but only when a literal has no SQL form (see [`Value::to_literal`]).

use crate::error::{Error, Result};
use crate::value::Value;
use smallvec::SmallVec;
use std::borrow::Cow;

/// `column = value`.
///
/// Also the payload of `set` assignments and explicit insert values.
#[derive(Debug, Clone, PartialEq)]
pub struct EqExpression {
    column: Cow<'static, str>,
    value: Value,
}

impl EqExpression {
    pub fn new(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn and(self, other: impl Into<Expression>) -> Expression {
        Expression::from(self).and(other)
    }

    pub fn render(&self) -> Result<String> {
        Ok(format!("{} = {}", self.column, self.value.to_literal()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// One `order by` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByTerm {
    column: Cow<'static, str>,
    direction: Direction,
    nulls: Option<NullsOrder>,
}

impl OrderByTerm {
    pub fn new(column: impl Into<Cow<'static, str>>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
            nulls: None,
        }
    }

    #[must_use]
    pub fn nulls_first(self) -> Self {
        Self {
            nulls: Some(NullsOrder::First),
            ..self
        }
    }

    #[must_use]
    pub fn nulls_last(self) -> Self {
        Self {
            nulls: Some(NullsOrder::Last),
            ..self
        }
    }

    pub fn render(&self) -> String {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        match self.nulls {
            None => format!("{} {direction}", self.column),
            Some(NullsOrder::First) => format!("{} {direction} nulls first", self.column),
            Some(NullsOrder::Last) => format!("{} {direction} nulls last", self.column),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Eq(EqExpression),
    Neq(EqExpression),
    And(Box<Expression>, Box<Expression>),
    OrderBy(OrderByTerm),
    /// `column in (...)`. An empty list renders `in ()` and matches nothing.
    ValueIn {
        column: Cow<'static, str>,
        values: Vec<Value>,
    },
}

impl Expression {
    pub fn and(self, other: impl Into<Expression>) -> Expression {
        Expression::And(Box::new(self), Box::new(other.into()))
    }

    /// Left-fold `exprs` into one `and` chain.
    ///
    /// ```
    /// use tabula_core::{EqExpression, Expression, Error};
    ///
    /// let chain = Expression::all([
    ///     EqExpression::new("a", 1),
    ///     EqExpression::new("b", 2),
    ///     EqExpression::new("c", 3),
    /// ])
    /// .unwrap();
    /// assert_eq!(chain.render().unwrap(), "a = 1 and b = 2 and c = 3");
    ///
    /// let empty: [EqExpression; 0] = [];
    /// assert!(matches!(Expression::all(empty), Err(Error::EmptyConjunction)));
    /// ```
    pub fn all<I>(exprs: I) -> Result<Expression>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let mut exprs = exprs.into_iter().map(Into::into);
        let first = exprs.next().ok_or(Error::EmptyConjunction)?;
        Ok(exprs.fold(first, |chain, next| chain.and(next)))
    }

    pub fn render(&self) -> Result<String> {
        match self {
            Expression::Eq(eq) => eq.render(),
            Expression::Neq(eq) => Ok(format!("{} != {}", eq.column, eq.value.to_literal()?)),
            Expression::And(left, right) => {
                Ok(format!("{} and {}", left.render()?, right.render()?))
            }
            Expression::OrderBy(term) => Ok(term.render()),
            Expression::ValueIn { column, values } => {
                let literals = values
                    .iter()
                    .map(Value::to_literal)
                    .collect::<Result<SmallVec<[String; 8]>>>()?;
                Ok(format!("{column} in ({})", literals.join(", ")))
            }
        }
    }
}

impl From<EqExpression> for Expression {
    fn from(eq: EqExpression) -> Self {
        Expression::Eq(eq)
    }
}

impl From<OrderByTerm> for Expression {
    fn from(term: OrderByTerm) -> Self {
        Expression::OrderBy(term)
    }
}

/// Render a list of expressions joined by `", "`.
pub(crate) fn render_list<'a, I>(exprs: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Expression>,
{
    let parts = exprs
        .into_iter()
        .map(Expression::render)
        .collect::<Result<SmallVec<[String; 8]>>>()?;
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_and_neq() {
        assert_eq!(EqExpression::new("id", 5).render().unwrap(), "id = 5");
        assert_eq!(
            Expression::Neq(EqExpression::new("name", String::from("Bob")))
                .render()
                .unwrap(),
            "name != 'Bob'"
        );
        assert_eq!(
            EqExpression::new("age", Value::Null).render().unwrap(),
            "age = NULL"
        );
    }

    #[test]
    fn and_chains_without_parentheses() {
        let expr = EqExpression::new("a", 1)
            .and(EqExpression::new("b", true))
            .and(EqExpression::new("c", String::from("x")));
        assert_eq!(expr.render().unwrap(), "a = 1 and b = true and c = 'x'");
    }

    #[test]
    fn all_folds_left() {
        let expr = Expression::all([EqExpression::new("a", 1), EqExpression::new("b", 2)]).unwrap();
        let Expression::And(left, right) = expr else {
            panic!("expected an and node");
        };
        assert_eq!(*left, Expression::Eq(EqExpression::new("a", 1)));
        assert_eq!(*right, Expression::Eq(EqExpression::new("b", 2)));
    }

    #[test]
    fn single_expression_is_not_wrapped() {
        let expr = Expression::all([EqExpression::new("a", 1)]).unwrap();
        assert_eq!(expr, Expression::Eq(EqExpression::new("a", 1)));
    }

    #[test]
    fn empty_conjunction_is_rejected() {
        let empty: Vec<Expression> = Vec::new();
        assert!(matches!(Expression::all(empty), Err(Error::EmptyConjunction)));
    }

    #[test]
    fn value_in() {
        let expr = Expression::ValueIn {
            column: "name".into(),
            values: vec![Value::Text("a".into()), Value::Text("b".into())],
        };
        assert_eq!(expr.render().unwrap(), "name in ('a', 'b')");

        let empty = Expression::ValueIn {
            column: "id".into(),
            values: Vec::new(),
        };
        assert_eq!(empty.render().unwrap(), "id in ()");
    }

    #[test]
    fn order_by_terms() {
        assert_eq!(OrderByTerm::new("age", Direction::Asc).render(), "age asc");
        assert_eq!(
            OrderByTerm::new("age", Direction::Desc).nulls_last().render(),
            "age desc nulls last"
        );
        assert_eq!(
            Expression::from(OrderByTerm::new("id", Direction::Asc).nulls_first())
                .render()
                .unwrap(),
            "id asc nulls first"
        );
    }

    #[test]
    fn render_surfaces_literal_errors() {
        let expr = EqExpression::new("ratio", f64::NAN);
        assert!(matches!(expr.render(), Err(Error::NonFiniteFloat(_))));
    }
}
