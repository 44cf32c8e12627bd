//! Prepared statements.

use std::sync::Arc;

use bytes::Bytes;
use firebird_protocol::{StatementInfo, StatementType, XSqlVar, message_blr};

use crate::error::{Error, Result};
use crate::row::{Column, columns_from_vars};

/// A statement prepared on the server.
///
/// Holds the server handle together with everything learned at prepare
/// time: the statement type, the input and output descriptors, and the
/// output BLR sent with every fetch. Release it with
/// [`Client::free`](crate::Client::free).
#[derive(Debug, Clone)]
pub struct Statement {
    handle: i32,
    sql: String,
    stmt_type: StatementType,
    params: Arc<[XSqlVar]>,
    outputs: Arc<[XSqlVar]>,
    columns: Arc<[Column]>,
    output_blr: Bytes,
}

impl Statement {
    pub(crate) fn from_info(handle: i32, sql: &str, info: StatementInfo) -> Result<Self> {
        let stmt_type = info
            .stmt_type
            .ok_or_else(|| Error::InvalidState("prepare did not report a statement type".into()))?;
        let outputs: Arc<[XSqlVar]> = info.select.map(|s| s.vars).unwrap_or_default().into();
        let params: Arc<[XSqlVar]> = info.bind.map(|s| s.vars).unwrap_or_default().into();
        let output_blr = if outputs.is_empty() {
            Bytes::new()
        } else {
            message_blr(&outputs)?
        };

        Ok(Self {
            handle,
            sql: sql.to_owned(),
            stmt_type,
            columns: columns_from_vars(&outputs),
            params,
            outputs,
            output_blr,
        })
    }

    /// Server statement handle.
    #[must_use]
    pub fn handle(&self) -> i32 {
        self.handle
    }

    /// The SQL text the statement was prepared from.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Statement type reported by the server.
    #[must_use]
    pub fn statement_type(&self) -> StatementType {
        self.stmt_type
    }

    /// Input parameter descriptors.
    #[must_use]
    pub fn params(&self) -> &Arc<[XSqlVar]> {
        &self.params
    }

    /// Output column descriptors.
    #[must_use]
    pub fn outputs(&self) -> &Arc<[XSqlVar]> {
        &self.outputs
    }

    /// Output column metadata.
    #[must_use]
    pub fn columns(&self) -> &Arc<[Column]> {
        &self.columns
    }

    /// BLR describing the output message.
    #[must_use]
    pub fn output_blr(&self) -> &Bytes {
        &self.output_blr
    }

    /// Whether executing this statement opens a cursor.
    #[must_use]
    pub fn has_cursor(&self) -> bool {
        self.stmt_type.opens_cursor()
    }

    /// Whether the statement returns a single row from `op_execute2`, as
    /// `EXECUTE PROCEDURE` does.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.stmt_type == StatementType::ExecProcedure && !self.outputs.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use firebird_protocol::{DescribedVars, SqlType};

    fn described(vars: Vec<XSqlVar>) -> Option<DescribedVars> {
        Some(DescribedVars {
            vars,
            resume_at: None,
        })
    }

    #[test]
    fn test_select_statement() {
        let info = StatementInfo {
            stmt_type: Some(StatementType::Select),
            select: described(vec![
                XSqlVar::new(SqlType::Long, 4).with_alias("A"),
                XSqlVar::new(SqlType::Varying, 10).with_alias("B"),
            ]),
            bind: described(vec![]),
        };
        let stmt = Statement::from_info(3, "select a, b from foo", info).unwrap();

        assert_eq!(stmt.handle(), 3);
        assert!(stmt.has_cursor());
        assert!(!stmt.is_singleton());
        assert_eq!(stmt.columns().len(), 2);
        assert_eq!(stmt.columns()[1].name, "B");
        assert!(stmt.params().is_empty());
        assert_eq!(stmt.output_blr(), &message_blr(stmt.outputs()).unwrap());
    }

    #[test]
    fn test_procedure_is_singleton() {
        let info = StatementInfo {
            stmt_type: Some(StatementType::ExecProcedure),
            select: described(vec![XSqlVar::new(SqlType::Long, 4)]),
            bind: described(vec![XSqlVar::new(SqlType::Long, 4)]),
        };
        let stmt = Statement::from_info(1, "execute procedure p(?)", info).unwrap();
        assert!(stmt.is_singleton());
        assert_eq!(stmt.params().len(), 1);
    }

    #[test]
    fn test_dml_has_no_output_blr() {
        let info = StatementInfo {
            stmt_type: Some(StatementType::Insert),
            select: None,
            bind: described(vec![XSqlVar::new(SqlType::Long, 4)]),
        };
        let stmt = Statement::from_info(1, "insert into t values (?)", info).unwrap();
        assert!(stmt.output_blr().is_empty());
        assert!(!stmt.has_cursor());
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert!(matches!(
            Statement::from_info(1, "x", StatementInfo::default()),
            Err(Error::InvalidState(_))
        ));
    }
}
