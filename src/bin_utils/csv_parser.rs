use std::io::Read;

use csv::{StringRecordsIntoIter, Trim};

/// One row of a batch file: the function name followed by its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub params: Vec<String>,
}

/// Parses invocations from headerless CSV where every row may have a different width.
pub struct CsvInvocationParser<R> {
    iter: StringRecordsIntoIter<R>,
}

impl<R> CsvInvocationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_records(),
        }
    }
}

impl<R> Iterator for CsvInvocationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Invocation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| {
            let row = row.map(|record| {
                let mut fields = record.iter().map(ToOwned::to_owned);
                Invocation {
                    function: fields.next().unwrap_or_default(),
                    params: fields.collect(),
                }
            });
            (curr_line, row)
        })
    }
}
