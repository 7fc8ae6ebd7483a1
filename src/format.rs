use std::fmt::{self, Display};
use std::io::{self, BufRead, Write};

use num::BigRational;

use polyhedra_linear::rational::{parse_ratio, row_text};
use polyhedra_linear::Matrix;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Representation {
    H,
    V,
}

#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    MissingBegin,
    MissingEnd,
    BadSizeLine(String),
    BadToken(String),
    WrongCount { expected: usize, got: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(err) => write!(f, "read failed: {}", err),
            ParseError::MissingBegin => write!(f, "no begin line"),
            ParseError::MissingEnd => write!(f, "no end line"),
            ParseError::BadSizeLine(line) => write!(f, "bad size line: {}", line),
            ParseError::BadToken(tok) => write!(f, "bad entry: {}", tok),
            ParseError::WrongCount { expected, got } => {
                write!(f, "expected {} entries, found {}", expected, got)
            }
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> ParseError {
        ParseError::Io(err)
    }
}

/// A parsed input file: the representation named by the header (H when
/// absent), the matrix, and whether the size line promised integer
/// entries.
pub struct PolyFile {
    pub representation: Representation,
    pub matrix: Matrix,
    pub integer_input: bool,
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('*') || line.starts_with('#')
}

/// Reads an lrs-style polyhedron file.
///
/// Everything before `begin` other than a representation header is an
/// option line and is ignored. The size line is `m n kind` where `m` may
/// be `*****` to defer the row count to `end`. Row breaks between
/// entries are not significant.
pub fn read_polyhedron<R: BufRead>(reader: R) -> Result<PolyFile, ParseError> {
    let mut representation = Representation::H;
    let mut lines = reader.lines();

    loop {
        let line = match lines.next() {
            None => return Err(ParseError::MissingBegin),
            Some(line) => line?,
        };
        let line = line.trim();
        if is_comment(line) {
            continue;
        }
        match line.to_ascii_lowercase().as_str() {
            "h-representation" => representation = Representation::H,
            "v-representation" => representation = Representation::V,
            "begin" => break,
            _ => {} // option line
        }
    }
    let size_line = loop {
        let line = match lines.next() {
            None => return Err(ParseError::MissingEnd),
            Some(line) => line?,
        };
        let trimmed = line.trim();
        // A deferred count starts with `*****`, which the comment rule
        // would otherwise swallow.
        if trimmed.starts_with("*****") || !is_comment(trimmed) {
            break line;
        }
    };

    let fields: Vec<&str> = size_line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(ParseError::BadSizeLine(size_line.trim().to_string()));
    }
    let declared_rows: Option<usize> = if fields[0] == "*****" {
        None
    } else {
        Some(
            fields[0]
                .parse()
                .map_err(|_| ParseError::BadSizeLine(size_line.trim().to_string()))?,
        )
    };
    let cols: usize = fields[1]
        .parse()
        .map_err(|_| ParseError::BadSizeLine(size_line.trim().to_string()))?;
    let integer_input = match fields[2] {
        "integer" => true,
        "rational" => false,
        _ => return Err(ParseError::BadSizeLine(size_line.trim().to_string())),
    };
    if cols == 0 {
        return Err(ParseError::BadSizeLine(size_line.trim().to_string()));
    }

    let mut tokens: Vec<String> = Vec::new();
    let mut saw_end = false;
    'outer: for line in lines {
        let line = line?;
        let line = line.trim();
        if is_comment(line) {
            continue;
        }
        for token in line.split_whitespace() {
            if token == "end" {
                saw_end = true;
                break 'outer;
            }
            tokens.push(token.to_string());
        }
    }
    if !saw_end {
        return Err(ParseError::MissingEnd);
    }

    let rows = match declared_rows {
        Some(rows) => rows,
        None => {
            if tokens.len() % cols != 0 {
                return Err(ParseError::WrongCount {
                    expected: tokens.len() / cols * cols,
                    got: tokens.len(),
                });
            }
            tokens.len() / cols
        }
    };
    if tokens.len() != rows * cols {
        return Err(ParseError::WrongCount {
            expected: rows * cols,
            got: tokens.len(),
        });
    }

    let mut matrix = Matrix::new(rows, cols);
    for (index, token) in tokens.iter().enumerate() {
        let value = parse_ratio(token).map_err(|_| ParseError::BadToken(token.clone()))?;
        matrix.set(index / cols, index % cols, value);
    }
    Ok(PolyFile {
        representation,
        matrix,
        integer_input,
    })
}

/// Writes a representation in the mirror of the input format: header,
/// `begin`, the deferred-count size line, canonical rows, `end`. Totals
/// comments are the caller's to append.
pub fn write_representation<W: Write>(
    writer: &mut W,
    representation: Representation,
    cols: usize,
    rows: &[Vec<BigRational>],
) -> io::Result<()> {
    let header = match representation {
        Representation::H => "H-representation",
        Representation::V => "V-representation",
    };
    writeln!(writer, "{}", header)?;
    writeln!(writer, "begin")?;
    writeln!(writer, "***** {} rational", cols)?;
    for row in rows {
        writeln!(writer, "{}", row_text(row))?;
    }
    writeln!(writer, "end")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::bigint::BigInt;
    use num::rational::Ratio;

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn reads_a_plain_h_file() {
        let text = "\
H-representation
begin
2 3 integer
0 1 0
0 0 1
end
";
        let file = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(file.representation, Representation::H);
        assert!(file.integer_input);
        assert_eq!(file.matrix.rows(), 2);
        assert_eq!(file.matrix.row(1), vec![q(0), q(0), q(1)]);
    }

    #[test]
    fn header_is_optional_and_defaults_to_h() {
        let text = "begin\n1 2 rational\n1 1/2\nend\n";
        let file = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(file.representation, Representation::H);
        assert!(!file.integer_input);
        assert_eq!(
            file.matrix.row(0),
            vec![q(1), Ratio::new(BigInt::from(1), BigInt::from(2))]
        );
    }

    #[test]
    fn deferred_row_count_is_counted_to_end() {
        let text = "\
* a comment
V-representation
printcobasis
begin
***** 3 rational
1 0 0
1 1 0
1 0 1
end
";
        let file = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(file.representation, Representation::V);
        assert_eq!(file.matrix.rows(), 3);
    }

    #[test]
    fn rows_may_wrap_across_lines() {
        let text = "begin\n2 2 integer\n1\n2 3\n4\nend\n";
        let file = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(file.matrix.row(0), vec![q(1), q(2)]);
        assert_eq!(file.matrix.row(1), vec![q(3), q(4)]);
    }

    #[test]
    fn comments_inside_the_body_are_skipped() {
        let text = "begin\n1 2 integer\n# half\n1 2\n* done\nend\n";
        let file = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(file.matrix.rows(), 1);
    }

    #[test]
    fn missing_begin_is_an_error() {
        assert!(matches!(
            read_polyhedron("1 2 integer\n".as_bytes()),
            Err(ParseError::MissingBegin)
        ));
    }

    #[test]
    fn missing_end_is_an_error() {
        assert!(matches!(
            read_polyhedron("begin\n1 2 integer\n1 2\n".as_bytes()),
            Err(ParseError::MissingEnd)
        ));
    }

    #[test]
    fn wrong_entry_count_is_an_error() {
        assert!(matches!(
            read_polyhedron("begin\n2 2 integer\n1 2 3\nend\n".as_bytes()),
            Err(ParseError::WrongCount { .. })
        ));
    }

    #[test]
    fn bad_tokens_are_an_error() {
        assert!(matches!(
            read_polyhedron("begin\n1 2 integer\n1 x\nend\n".as_bytes()),
            Err(ParseError::BadToken(_))
        ));
        assert!(matches!(
            read_polyhedron("begin\n1 2 integer\n1 1/0\nend\n".as_bytes()),
            Err(ParseError::BadToken(_))
        ));
    }

    #[test]
    fn writer_mirrors_the_reader() {
        let rows = vec![vec![q(1), q(0)], vec![q(0), q(1)]];
        let mut out = Vec::new();
        write_representation(&mut out, Representation::V, 2, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "V-representation\nbegin\n***** 2 rational\n1 0\n0 1\nend\n");
        let back = read_polyhedron(text.as_bytes()).unwrap();
        assert_eq!(back.representation, Representation::V);
        assert_eq!(back.matrix.to_rows(), rows);
    }
}
