// crates/tc_io/src/table.rs

//! 简单 CSV 表格
//!
//! 所有结果表都是"表头 + 若干行"的小表，按列顺序写出，
//! 浮点数使用最短往返表示。

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{IoError, IoResult};

/// 单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// 整数
    Int(i64),
    /// 浮点
    Float(f64),
    /// 文本
    Text(String),
    /// 布尔
    Bool(bool),
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Int(i64::from(v))
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// 内存中的 CSV 表
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl CsvTable {
    /// 以表名与表头创建
    pub fn new<I, S>(name: &str, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// 追加一行，列数必须与表头一致
    pub fn push(&mut self, row: Vec<Cell>) -> IoResult<()> {
        if row.len() != self.headers.len() {
            return Err(IoError::RowWidth {
                table: self.name.clone(),
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// 表头
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否没有数据行
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 写入任意输出（引号转义由 csv 写出器处理）
    pub fn write_to<W: Write>(&self, out: W) -> IoResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Cell::to_string))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 写入文件
    pub fn save(&self, path: &Path) -> IoResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!("写出 {} ({} 行)", path.display(), self.rows.len());
        Ok(())
    }
}

/// 单行键值表（运行参数与最终结果）
pub fn key_value_row(name: &str, entries: Vec<(&str, Cell)>) -> IoResult<CsvTable> {
    let (headers, row): (Vec<&str>, Vec<Cell>) = entries.into_iter().unzip();
    let mut table = CsvTable::new(name, headers);
    table.push(row)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_table() {
        let mut t = CsvTable::new("t", ["pass", "value", "note"]);
        t.push(vec![1u32.into(), 0.5.into(), "a,b".into()]).unwrap();
        let mut buf = Vec::new();
        t.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "pass,value,note\n1,0.5,\"a,b\"\n");
    }

    #[test]
    fn test_quoted_text_reads_back() {
        let mut t = CsvTable::new("t", ["label", "x_m"]);
        t.push(vec!["say \"hi\", twice".into(), 2.5.into()]).unwrap();
        let mut buf = Vec::new();
        t.write_to(&mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "say \"hi\", twice");
        assert_eq!(&record[1], "2.5");
    }

    #[test]
    fn test_row_width_checked() {
        let mut t = CsvTable::new("t", ["a", "b"]);
        assert!(t.push(vec![1u32.into()]).is_err());
        assert!(t.is_empty());
    }

    #[test]
    fn test_key_value_row() {
        let t = key_value_row("meta", vec![("passes", 30u32.into()), ("ok", true.into())]).unwrap();
        assert_eq!(t.headers(), &["passes".to_string(), "ok".to_string()]);
        assert_eq!(t.len(), 1);
    }
}
