use std::iter::FusedIterator;

use log::{debug, trace, warn};

use crate::{
    MAX_PAGE_SIZE, PAGE_SIZE, ROW_SIZE, TABLE_MAX_PAGES,
    error::{DatabaseError, Result},
    page::Page,
    row::Record,
};

/// Capacity settings fixed when a table is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: TABLE_MAX_PAGES,
        }
    }
}

impl TableConfig {
    /// A page never holds a partial row.
    pub fn rows_per_page(&self) -> usize {
        self.page_size / ROW_SIZE
    }

    /// Saturates for configs that `validate` would reject.
    pub fn max_rows(&self) -> usize {
        self.rows_per_page().saturating_mul(self.max_pages)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size < ROW_SIZE {
            return Err(DatabaseError::InvalidConfig {
                details: format!(
                    "page size {} cannot hold a {}-byte row",
                    self.page_size, ROW_SIZE
                ),
            });
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(DatabaseError::InvalidConfig {
                details: format!(
                    "page size {} exceeds the {}-byte maximum",
                    self.page_size, MAX_PAGE_SIZE
                ),
            });
        }
        if self.max_pages == 0 {
            return Err(DatabaseError::InvalidConfig {
                details: "max pages must be at least 1".to_string(),
            });
        }
        if self.rows_per_page().checked_mul(self.max_pages).is_none() {
            return Err(DatabaseError::InvalidConfig {
                details: format!("max pages {} overflows the row count", self.max_pages),
            });
        }
        Ok(())
    }
}

/// Where a row index lives: page number plus byte offset within that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAddress {
    pub page: usize,
    pub offset: usize,
    pub len: usize,
}

/// Append-only, in-memory row store made of lazily allocated pages.
///
/// The table owns every page; nothing outside it keeps a page reference.
/// Pages are indexed by page number and the vector only grows as far as the
/// highest page touched so far.
pub struct Table {
    config: TableConfig,
    num_rows: usize,
    pages: Vec<Option<Page>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
            num_rows: 0,
            pages: Vec::new(),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            num_rows: 0,
            pages: Vec::new(),
        })
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn row_count(&self) -> usize {
        self.num_rows
    }

    pub fn rows_per_page(&self) -> usize {
        self.config.rows_per_page()
    }

    pub fn max_rows(&self) -> usize {
        self.config.max_rows()
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.max_rows()
    }

    /// Number of pages that have been allocated so far.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    pub fn locate(&self, row_index: usize) -> Result<SlotAddress> {
        let max_rows = self.max_rows();
        if row_index >= max_rows {
            return Err(DatabaseError::IndexOutOfRange {
                index: row_index,
                max_rows,
            });
        }

        let rows_per_page = self.rows_per_page();
        Ok(SlotAddress {
            page: row_index / rows_per_page,
            offset: (row_index % rows_per_page) * ROW_SIZE,
            len: ROW_SIZE,
        })
    }

    /// Writable window for `row_index`, allocating its page on first touch.
    pub fn slot_mut(&mut self, row_index: usize) -> Result<&mut [u8; ROW_SIZE]> {
        let address = self.locate(row_index)?;
        let page_size = self.config.page_size;
        let max_rows = self.max_rows();

        if self.pages.len() <= address.page {
            self.pages.resize_with(address.page + 1, || None);
        }
        let page = self.pages[address.page].get_or_insert_with(|| {
            debug!("allocating page {} ({} bytes)", address.page, page_size);
            Page::new(page_size)
        });

        page.slot_mut(address.offset)
            .ok_or(DatabaseError::IndexOutOfRange {
                index: row_index,
                max_rows,
            })
    }

    /// Decoded record at `row_index`, or `None` if that row is unwritten.
    pub fn row(&self, row_index: usize) -> Option<Record> {
        if row_index >= self.num_rows {
            return None;
        }
        let address = self.locate(row_index).ok()?;
        let page = self.pages.get(address.page)?.as_ref()?;
        trace!(
            "reading row {} from page {} offset {}",
            row_index, address.page, address.offset
        );
        page.slot(address.offset).map(Record::decode)
    }

    pub fn append(&mut self, record: &Record) -> Result<()> {
        if self.is_full() {
            warn!("table full, rejecting row id {}", record.id);
            return Err(DatabaseError::TableFull {
                max_rows: self.max_rows(),
            });
        }

        let row_index = self.num_rows;
        record.encode(self.slot_mut(row_index)?);
        self.num_rows += 1;
        debug!("appended row {} (id {})", row_index, record.id);
        Ok(())
    }

    /// Iterates rows in insertion order, up to the row count at call time.
    pub fn scan(&self) -> Scan<'_> {
        Scan {
            table: self,
            next: 0,
            end: self.num_rows,
        }
    }
}

pub struct Scan<'a> {
    table: &'a Table,
    next: usize,
    end: usize,
}

impl Iterator for Scan<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let record = self.table.row(self.next);
        debug_assert!(record.is_some(), "occupied row {} is unreadable", self.next);
        self.next = match record {
            Some(_) => self.next + 1,
            None => self.end,
        };
        record
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Scan<'_> {}

impl FusedIterator for Scan<'_> {}

impl<'a> IntoIterator for &'a Table {
    type Item = Record;
    type IntoIter = Scan<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.scan()
    }
}
