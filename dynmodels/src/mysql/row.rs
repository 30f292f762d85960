//! MySQL row conversion

use crate::error::{Error, Result};
use crate::row::DynRow;
use mysql_async::Row as MySqlAsyncRow;

use super::types::from_mysql_value;

/// Convert a mysql_async Row into a [`DynRow`], keeping column order.
pub(crate) fn from_mysql_row(row: MySqlAsyncRow) -> Result<DynRow> {
    let columns = row.columns_ref();
    let mut values = DynRow::with_capacity(columns.len());

    for (i, column) in columns.iter().enumerate() {
        let column_name = column.name_str().to_string();
        let mysql_value = row
            .as_ref(i)
            .ok_or_else(|| Error::ColumnNotFound(column_name.clone()))?
            .clone();
        values.push(column_name, from_mysql_value(mysql_value)?);
    }

    Ok(values)
}
