//! Sql string operation.

/// Type that represent sql string.
pub trait Sql {
    /// Returns sql string, without the `bulk` keyword.
    fn sql(&self) -> &str;

    /// Return `true` if rows of the statement should be buffered and sent
    /// in batches.
    fn is_bulk(&self) -> bool;
}

/// Split the leading `bulk` keyword, case insensitive.
fn split_bulk(sql: &str) -> Option<&str> {
    let trimmed = sql.trim_start();
    let (keyword, rest) = trimmed.split_at_checked(4)?;
    if !keyword.eq_ignore_ascii_case("bulk") || !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

impl Sql for &str {
    fn sql(&self) -> &str {
        split_bulk(self).unwrap_or(self)
    }

    fn is_bulk(&self) -> bool {
        split_bulk(self).is_some()
    }
}

impl Sql for String {
    fn sql(&self) -> &str {
        split_bulk(self).unwrap_or(self)
    }

    fn is_bulk(&self) -> bool {
        split_bulk(self).is_some()
    }
}

/// Bulk query string.
#[derive(Debug)]
pub struct SqlBulk<'sql>(&'sql str);

impl Sql for SqlBulk<'_> {
    fn sql(&self) -> &str {
        self.0.sql()
    }

    fn is_bulk(&self) -> bool {
        true
    }
}

/// Extension trait for easier bulk config.
pub trait SqlExt<'a> {
    /// Mark the statement as bulk.
    fn bulk(self) -> SqlBulk<'a>;
}

impl<'a> SqlExt<'a> for &'a str {
    fn bulk(self) -> SqlBulk<'a> {
        SqlBulk(self)
    }
}

impl<'a> SqlExt<'a> for SqlBulk<'a> {
    fn bulk(self) -> SqlBulk<'a> {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bulk_keyword() {
        let sql = "bulk insert into t values (?)";
        assert!(Sql::is_bulk(&sql));
        assert_eq!(Sql::sql(&sql), "insert into t values (?)");

        let sql = "  BULK\n  insert into t values (?)";
        assert!(Sql::is_bulk(&sql));
        assert_eq!(Sql::sql(&sql), "insert into t values (?)");

        let sql = "bulky_table_insert()";
        assert!(!Sql::is_bulk(&sql));
        assert_eq!(Sql::sql(&sql), sql);

        assert!(!Sql::is_bulk(&"bulk"));
    }

    #[test]
    fn owned_sql() {
        let sql = String::from("bulk insert into t values (?)");
        assert!(sql.is_bulk());
        assert_eq!(sql.sql(), "insert into t values (?)");

        let sql = String::from("select 1 from dummy");
        assert!(!sql.is_bulk());
        assert_eq!(sql.sql(), "select 1 from dummy");
    }

    #[test]
    fn bulk_ext() {
        let sql = "insert into t values (?)".bulk();
        assert!(sql.is_bulk());
        assert_eq!(sql.sql(), "insert into t values (?)");
    }
}
