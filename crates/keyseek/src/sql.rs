//! Rendering of a [`QueryRequest`] as parameterized SQL.
//!
//! Conditions use positional `?` placeholders. Raw clauses are spliced in
//! parentheses with their parameters at the matching position, so the
//! parameter list lines up with the placeholders left to right.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SeekError};
use crate::order::OrderSpec;
use crate::predicate::Predicate;
use crate::request::QueryRequest;
use crate::value::Scalar;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("identifier pattern"));

/// SQL fragments of a rendered request.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    /// The `WHERE` condition, without the keyword. `None` restricts nothing.
    pub condition: Option<String>,
    /// Parameters for the `?` placeholders of `condition`, in order.
    pub params: Vec<Scalar>,
    /// The `ORDER BY` list, without the keyword.
    pub order_by: String,
    /// The row limit.
    pub limit: usize,
}

impl SqlQuery {
    /// Renders `request`.
    ///
    /// Fails with [`SeekError::InvalidColumnName`] when a column name is not
    /// a plain or dotted identifier.
    ///
    /// ```
    /// use keyseek::{Op, OrderSpec, Predicate, QueryRequest, SeekConfig, SqlQuery};
    ///
    /// let order = OrderSpec::parse("author_id", &SeekConfig::default()).unwrap();
    /// let request = QueryRequest::first(Some(Predicate::compare("id", Op::Gt, 4)), order);
    /// let sql = SqlQuery::render(&request).unwrap();
    ///
    /// assert_eq!(sql.condition.as_deref(), Some("id > ?"));
    /// assert_eq!(sql.order_by, "author_id ASC, id ASC");
    /// ```
    pub fn render(request: &QueryRequest) -> Result<SqlQuery> {
        let mut params = Vec::new();
        let condition = request
            .predicate
            .as_ref()
            .map(|predicate| render_predicate(predicate, &mut params))
            .transpose()?;

        Ok(SqlQuery {
            condition,
            params,
            order_by: render_order(&request.order)?,
            limit: request.limit,
        })
    }

    /// Assembles a full `SELECT` over `table`.
    pub fn statement(&self, table: &str) -> Result<String> {
        validate_identifier(table)?;
        let mut sql = format!("SELECT * FROM {table}");
        if let Some(condition) = &self.condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        sql.push_str(&format!(" ORDER BY {} LIMIT {}", self.order_by, self.limit));
        Ok(sql)
    }
}

/// Checks that `name` can be interpolated into SQL as an identifier.
pub fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(SeekError::InvalidColumnName {
            name: name.to_string(),
        })
    }
}

fn render_order(order: &OrderSpec) -> Result<String> {
    let parts = order
        .columns()
        .iter()
        .map(|entry| {
            validate_identifier(&entry.column)?;
            Ok(entry.to_string())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(", "))
}

fn render_predicate(predicate: &Predicate, params: &mut Vec<Scalar>) -> Result<String> {
    match predicate {
        Predicate::Comparison(cmp) => {
            validate_identifier(&cmp.column)?;
            params.push(cmp.value.clone());
            Ok(format!("{} {} ?", cmp.column, cmp.op))
        }
        Predicate::And(children) if children.is_empty() => Ok("1 = 1".to_string()),
        Predicate::Or(children) if children.is_empty() => Ok("1 = 0".to_string()),
        Predicate::And(children) => render_group(children, " AND ", params),
        Predicate::Or(children) => render_group(children, " OR ", params),
        Predicate::Raw(raw) => {
            params.extend(raw.params.iter().cloned());
            Ok(format!("({})", raw.sql))
        }
    }
}

fn render_group(children: &[Predicate], sep: &str, params: &mut Vec<Scalar>) -> Result<String> {
    let parts = children
        .iter()
        .map(|child| {
            let sql = render_predicate(child, params)?;
            Ok(match child {
                Predicate::And(c) | Predicate::Or(c) if c.len() > 1 => format!("({sql})"),
                _ => sql,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(sep))
}
