// SQL compiler facade
// text -> tokens -> statement -> result, for exactly one statement per call.
// This is the only place errors are caught; every failure becomes a CompileResult.

use crate::error::{Result, SqlError};
use crate::query::ast::{Statement, StatementKind};
use crate::query::executor::{format_rows, QueryExecutor, QueryResult};
use crate::query::{lexer, parser};
use crate::storage::{Database, ResultSet};
use serde::Serialize;

/// A compiler session: owns the database that statements run against
#[derive(Default)]
pub struct SqlCompiler {
    executor: QueryExecutor,
}

impl SqlCompiler {
    /// Create a session with an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex and parse one statement without running it
    pub fn compile(sql: &str) -> Result<Statement> {
        let tokens = lexer::tokenize(normalize(sql))?;
        Ok(parser::parse(tokens)?)
    }

    /// Compile and run one statement
    /// Never fails: errors from any stage come back as an unsuccessful result.
    pub fn compile_and_execute(&mut self, sql: &str) -> CompileResult {
        let outcome = Self::compile(sql).and_then(|statement| self.executor.execute(statement));

        match outcome {
            Ok(result) => CompileResult::success(result),
            Err(err) => CompileResult::failure(err),
        }
    }

    /// The database, for listing tables and schemas
    pub fn database(&self) -> &Database {
        self.executor.database()
    }
}

/// Trim surrounding whitespace and one trailing `;`
fn normalize(sql: &str) -> &str {
    let sql = sql.trim();
    sql.strip_suffix(';').unwrap_or(sql)
}

/// The outcome of one call to `compile_and_execute`
///
/// Serializes as e.g.
/// `{"success":true,"statementKind":"SELECT","message":"1 row(s) returned","rows":[{"id":1}],"rowCount":1}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub success: bool,
    pub statement_kind: StatementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<ResultSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub cause: Option<SqlError>,
}

impl CompileResult {
    fn success(result: QueryResult) -> Self {
        Self {
            success: true,
            statement_kind: result.kind,
            message: Some(result.message),
            row_count: result.rows.as_ref().map(ResultSet::len),
            rows: result.rows,
            error: None,
            cause: None,
        }
    }

    fn failure(err: SqlError) -> Self {
        Self {
            success: false,
            statement_kind: StatementKind::Error,
            message: None,
            rows: None,
            row_count: None,
            error: Some(err.to_string()),
            cause: Some(err),
        }
    }

    /// Format the result as a string for display
    pub fn format(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {}", error);
        }

        match &self.rows {
            Some(rows) => format_rows(rows),
            None => self.message.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::Value;
    use proptest::prelude::*;

    fn run(compiler: &mut SqlCompiler, sql: &str) -> CompileResult {
        let result = compiler.compile_and_execute(sql);
        assert!(result.success, "{} failed: {:?}", sql, result.error);
        result
    }

    fn students() -> SqlCompiler {
        let mut compiler = SqlCompiler::new();
        run(
            &mut compiler,
            "CREATE TABLE students (id INT, name VARCHAR(50), age INT, grade VARCHAR(2))",
        );
        for sql in [
            "INSERT INTO students VALUES (1, 'Alice', 20, 'A')",
            "INSERT INTO students VALUES (2, 'Bob', 21, 'B')",
            "INSERT INTO students VALUES (3, 'Charlie', 19, 'A')",
            "INSERT INTO students VALUES (4, 'Diana', 22, 'C')",
        ] {
            run(&mut compiler, sql);
        }
        compiler
    }

    fn names(result: &CompileResult) -> Vec<Value> {
        let rows = result.rows.as_ref().unwrap();
        (0..rows.len())
            .map(|i| rows.value(i, "name").cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_end_to_end() {
        let mut compiler = SqlCompiler::new();
        run(
            &mut compiler,
            "CREATE TABLE s (id INT, name VARCHAR(50), age INT)",
        );
        run(&mut compiler, "INSERT INTO s VALUES (1,'Alice',20)");
        run(&mut compiler, "INSERT INTO s VALUES (2,'Bob',21)");
        let update = run(&mut compiler, "UPDATE s SET age = 22 WHERE name = 'Bob'");
        assert_eq!(update.message.as_deref(), Some("1 row(s) updated in 's'"));

        let result = run(&mut compiler, "SELECT * FROM s WHERE age > 20");
        assert_eq!(result.statement_kind, StatementKind::Select);
        assert_eq!(result.row_count, Some(1));

        let rows = result.rows.unwrap();
        assert_eq!(rows.columns, vec!["id", "name", "age"]);
        assert_eq!(
            rows.rows[0].values,
            vec![
                Value::Integer(2),
                Value::Text("Bob".into()),
                Value::Integer(22)
            ]
        );
    }

    #[test]
    fn test_where_and() {
        let mut compiler = students();
        let result = run(
            &mut compiler,
            "SELECT * FROM students WHERE age > 19 AND grade = 'A'",
        );

        assert_eq!(result.row_count, Some(1));
        assert_eq!(names(&result), vec![Value::Text("Alice".into())]);
    }

    #[test]
    fn test_where_or() {
        let mut compiler = students();
        let result = run(
            &mut compiler,
            "SELECT name FROM students WHERE grade = 'C' OR id = 1",
        );

        assert_eq!(
            names(&result),
            vec![Value::Text("Alice".into()), Value::Text("Diana".into())]
        );
    }

    #[test]
    fn test_float_comparison() {
        let mut compiler = SqlCompiler::new();
        run(
            &mut compiler,
            "CREATE TABLE employees (emp_id INT, name VARCHAR(100), salary FLOAT, dept VARCHAR(50))",
        );
        run(
            &mut compiler,
            "INSERT INTO employees VALUES (101, 'John Doe', 50000.50, 'IT')",
        );
        run(
            &mut compiler,
            "INSERT INTO employees VALUES (102, 'Jane Smith', 60000.75, 'HR')",
        );

        let result = run(&mut compiler, "SELECT * FROM employees WHERE salary > 55000");
        assert_eq!(names(&result), vec![Value::Text("Jane Smith".into())]);
    }

    #[test]
    fn test_projection_and_delete() {
        let mut compiler = students();

        let result = run(&mut compiler, "SELECT name, grade FROM students");
        assert_eq!(result.rows.as_ref().unwrap().columns, vec!["name", "grade"]);
        assert_eq!(result.row_count, Some(4));

        let result = run(&mut compiler, "DELETE FROM students WHERE age < 20");
        assert_eq!(
            result.message.as_deref(),
            Some("1 row(s) deleted from 'students'")
        );

        let result = run(&mut compiler, "SELECT * FROM students");
        assert_eq!(
            names(&result),
            vec![
                Value::Text("Alice".into()),
                Value::Text("Bob".into()),
                Value::Text("Diana".into())
            ]
        );
    }

    #[test]
    fn test_delete_without_where_empties_table() {
        let mut compiler = students();

        let result = run(&mut compiler, "DELETE FROM students;");
        assert_eq!(
            result.message.as_deref(),
            Some("4 row(s) deleted from 'students'")
        );
        assert_eq!(compiler.database().table_info("students").unwrap().row_count, 0);
    }

    #[test]
    fn test_missing_table() {
        let mut compiler = SqlCompiler::new();
        let result = compiler.compile_and_execute("SELECT * FROM ghost");

        assert!(!result.success);
        assert_eq!(result.statement_kind, StatementKind::Error);
        assert_eq!(result.error.as_deref(), Some("Table 'ghost' does not exist"));
        assert_eq!(
            result.cause,
            Some(SqlError::Storage(StorageError::NoSuchTable("ghost".into())))
        );
        assert!(result.rows.is_none());
    }

    #[test]
    fn test_arity_mismatch() {
        let mut compiler = SqlCompiler::new();
        run(&mut compiler, "CREATE TABLE t (a INT, b INT)");

        let result = compiler.compile_and_execute("INSERT INTO t VALUES (1,2,3)");
        assert!(!result.success);
        assert!(matches!(
            result.cause,
            Some(SqlError::Storage(StorageError::ArityMismatch {
                expected: 2,
                found: 3
            }))
        ));
        assert_eq!(compiler.database().table_info("t").unwrap().row_count, 0);
    }

    #[test]
    fn test_recreate_table_keeps_rows() {
        let mut compiler = SqlCompiler::new();
        run(&mut compiler, "CREATE TABLE t (a INT, b INT)");
        run(&mut compiler, "INSERT INTO t VALUES (1, 2)");

        let result = compiler.compile_and_execute("CREATE TABLE t (c DATE)");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Table 't' already exists"));

        let result = run(&mut compiler, "SELECT * FROM t");
        assert_eq!(result.rows.unwrap().columns, vec!["a", "b"]);
        assert_eq!(result.row_count, Some(1));
    }

    #[test]
    fn test_drop_then_select() {
        let mut compiler = students();
        let result = run(&mut compiler, "DROP TABLE students");
        assert_eq!(result.statement_kind, StatementKind::Drop);

        let result = compiler.compile_and_execute("SELECT * FROM students");
        assert!(matches!(
            result.cause,
            Some(SqlError::Storage(StorageError::NoSuchTable(_)))
        ));
        assert!(compiler.database().list_tables().is_empty());
    }

    #[test]
    fn test_lex_and_syntax_errors_become_results() {
        let mut compiler = SqlCompiler::new();

        let result = compiler.compile_and_execute("SELECT * FROM t WHERE name = 'open");
        assert!(matches!(result.cause, Some(SqlError::Lex(_))));
        assert!(result.error.unwrap().contains("unterminated"));

        let result = compiler.compile_and_execute("SELECT FROM t");
        assert!(matches!(result.cause, Some(SqlError::Syntax(_))));
        assert_eq!(result.statement_kind, StatementKind::Error);

        let result = compiler.compile_and_execute("   ");
        assert!(!result.success);

        let result = compiler.compile_and_execute("DROP TABLE a; DROP TABLE b");
        assert!(matches!(result.cause, Some(SqlError::Syntax(_))));
    }

    #[test]
    fn test_trailing_semicolons_and_comment() {
        let mut compiler = students();

        let result = run(&mut compiler, "SELECT * FROM students;;");
        assert_eq!(result.row_count, Some(4));

        let result = run(&mut compiler, "DROP TABLE students; -- done");
        assert_eq!(result.statement_kind, StatementKind::Drop);
        assert!(compiler.database().list_tables().is_empty());
    }

    #[test]
    fn test_large_integer_against_float_is_exact() {
        let mut compiler = SqlCompiler::new();
        run(&mut compiler, "CREATE TABLE t (n INT)");
        run(&mut compiler, "INSERT INTO t VALUES (9007199254740993)");

        let result = run(&mut compiler, "SELECT * FROM t WHERE n = 9007199254740992.0");
        assert_eq!(result.row_count, Some(0));

        let result = run(&mut compiler, "SELECT * FROM t WHERE n > 9007199254740992.0");
        assert_eq!(result.row_count, Some(1));
    }

    #[test]
    fn test_repeated_projection_column() {
        let mut compiler = students();
        let result = run(&mut compiler, "SELECT name, id, name FROM students WHERE id = 1");

        let json = serde_json::to_string(&result.rows).unwrap();
        assert_eq!(json, r#"[{"name":"Alice","id":1}]"#);
    }

    #[test]
    fn test_schema_integrity() {
        let mut compiler = SqlCompiler::new();
        run(&mut compiler, "CREATE TABLE t (a INT, b INT)");
        run(&mut compiler, "INSERT INTO t (b) VALUES (5)");

        let result = compiler.compile_and_execute("UPDATE t SET c = 1");
        assert!(matches!(
            result.cause,
            Some(SqlError::Storage(StorageError::UnknownColumn { .. }))
        ));

        let result = compiler.compile_and_execute("INSERT INTO t (a, a) VALUES (1, 2)");
        assert!(matches!(
            result.cause,
            Some(SqlError::Storage(StorageError::DuplicateColumn { .. }))
        ));

        let table = compiler.database().get_table("t").unwrap();
        assert_eq!(table.row_count(), 1);
        assert!(table.rows().iter().all(|row| row.values.len() == 2));
        assert_eq!(table.rows()[0].values, vec![Value::Null, Value::Integer(5)]);
    }

    #[test]
    fn test_unknown_projection_column_is_null() {
        let mut compiler = students();
        let result = run(&mut compiler, "SELECT name, nickname FROM students WHERE id = 2");

        let rows = result.rows.unwrap();
        assert_eq!(rows.value(0, "nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_json_shape() {
        let mut compiler = SqlCompiler::new();
        run(&mut compiler, "CREATE TABLE t (id INT, name VARCHAR(5))");
        run(&mut compiler, "INSERT INTO t VALUES (1, 'Ann')");

        let select = serde_json::to_value(run(&mut compiler, "SELECT * FROM t")).unwrap();
        assert_eq!(
            select,
            serde_json::json!({
                "success": true,
                "statementKind": "SELECT",
                "message": "1 row(s) returned",
                "rows": [{"id": 1, "name": "Ann"}],
                "rowCount": 1
            })
        );

        let failure = serde_json::to_value(compiler.compile_and_execute("DROP TABLE nope")).unwrap();
        assert_eq!(
            failure,
            serde_json::json!({
                "success": false,
                "statementKind": "ERROR",
                "error": "Table 'nope' does not exist"
            })
        );
    }

    #[test]
    fn test_format() {
        let mut compiler = SqlCompiler::new();
        let result = compiler.compile_and_execute("DROP TABLE nope");
        assert_eq!(result.format(), "Error: Table 'nope' does not exist");

        let result = run(&mut compiler, "CREATE TABLE t (a INT)");
        assert_eq!(result.format(), "Table 't' created successfully");
    }

    #[test]
    fn test_compile_only() {
        let statement = SqlCompiler::compile("  DROP TABLE t ;  ").unwrap();
        assert_eq!(
            statement,
            Statement::DropTable {
                table_name: "t".into()
            }
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = students();
        let mut second = SqlCompiler::new();

        assert!(!second.compile_and_execute("SELECT * FROM students").success);
        run(&mut first, "SELECT * FROM students");
    }

    proptest! {
        #[test]
        fn inserted_rows_come_back_in_order(
            rows in proptest::collection::vec((0i64..1_000_000, "[a-zA-Z ]{0,12}"), 0..20)
        ) {
            let mut compiler = SqlCompiler::new();
            let created = compiler.compile_and_execute("CREATE TABLE t (n INT, s VARCHAR(12))");
            prop_assert!(created.success);

            for (n, s) in &rows {
                let result = compiler.compile_and_execute(&format!("INSERT INTO t VALUES ({}, '{}')", n, s));
                prop_assert!(result.success);
            }

            let first = compiler.compile_and_execute("SELECT * FROM t");
            prop_assert_eq!(first.row_count, Some(rows.len()));

            let returned = first.rows.clone().unwrap();
            for (i, (n, s)) in rows.iter().enumerate() {
                prop_assert_eq!(&returned.rows[i].values, &vec![Value::Integer(*n), Value::Text(s.clone())]);
            }

            // Reading again without changes gives the same answer
            let second = compiler.compile_and_execute("SELECT * FROM t");
            prop_assert_eq!(first, second);
        }
    }
}
