//! DIMACS CNF reader and writer for the dpll SAT solver.
//!
//! The reader is line oriented: each non-comment line holds exactly one clause terminated by
//! `0`. Lines starting with `c`, `0` or `%` are ignored, which also skips the `%` / `0` trailer
//! found in SATLIB benchmark files.

use std::{borrow::Borrow, io, mem::replace};

use dpll_formula::{CnfFormula, Lit, Var};

use anyhow::Error;
use log::warn;
use thiserror::Error;

/// Number of lines parsed between callback invocations of
/// [`parse_incremental`](DimacsParser::parse_incremental).
const LINES_PER_CHUNK: usize = 1 << 12;

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {}: Unexpected token in DIMACS CNF input: '{}'", line, token)]
    UnexpectedInput { line: usize, token: String },
    #[error("line {}: Literal is too large: {}", line, literal)]
    LiteralTooLarge { line: usize, literal: String },
    #[error("line {}: Invalid header syntax: {}", line, header)]
    InvalidHeader { line: usize, header: String },
    #[error("line {}: Duplicate header", line)]
    DuplicateHeader { line: usize },
    #[error("line {}: Clause is not terminated by 0", line)]
    UnterminatedClause { line: usize },
    #[error(
        "Formula has {} variables while the header specifies {} variables",
        var_count,
        header_var_count
    )]
    VarCount {
        var_count: usize,
        header_var_count: usize,
    },
    #[error("Parser invoked after a previous error")]
    PreviousError,
}

/// Variable and clause count present in a DIMACS CNF header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Parser for DIMACS CNF input.
///
/// Input is fed one line at a time. The parsed clauses can be taken out in pieces using
/// [`take_formula`](DimacsParser::take_formula).
pub struct DimacsParser {
    formula: CnfFormula,
    header: Option<DimacsHeader>,
    line_number: usize,
    clause_count: usize,
    max_var_count: usize,
    error: bool,
}

impl Default for DimacsParser {
    fn default() -> DimacsParser {
        DimacsParser::new()
    }
}

impl DimacsParser {
    pub fn new() -> DimacsParser {
        DimacsParser {
            formula: CnfFormula::new(),
            header: None,
            line_number: 0,
            clause_count: 0,
            max_var_count: 0,
            error: false,
        }
    }

    /// Parse the whole input into a single [`CnfFormula`] and check the header if present.
    ///
    /// The variable count of the result is the one declared in the header, if there is one.
    pub fn parse(input: impl io::Read) -> Result<CnfFormula, Error> {
        Ok(Self::parse_incremental(input, |_| Ok(()))?.take_formula())
    }

    /// Parse the given input incrementally and check the header if present.
    ///
    /// The callback is invoked repeatedly with a reference to the parser and can consume the
    /// clauses parsed so far by calling [`take_formula`](DimacsParser::take_formula).
    pub fn parse_incremental(
        input: impl io::Read,
        mut callback: impl FnMut(&mut DimacsParser) -> Result<(), Error>,
    ) -> Result<DimacsParser, Error> {
        use io::BufRead;

        let mut parser = Self::new();

        let mut lines_in_chunk = 0;
        for line in io::BufReader::new(input).lines() {
            parser.parse_line(&line?)?;
            lines_in_chunk += 1;
            if lines_in_chunk == LINES_PER_CHUNK {
                lines_in_chunk = 0;
                callback(&mut parser)?;
            }
        }
        callback(&mut parser)?;
        parser.check_header()?;

        Ok(parser)
    }

    /// Parse a single line of input, without the line terminator.
    ///
    /// If this returns an error the parser is left in an invalid state and rejects further
    /// input.
    pub fn parse_line(&mut self, line: &str) -> Result<(), ParserError> {
        if self.error {
            return Err(ParserError::PreviousError);
        }
        self.line_number += 1;

        let result = match line.trim_start().as_bytes().first() {
            None | Some(b'c') | Some(b'0') | Some(b'%') => Ok(()),
            Some(b'p') => self.parse_header_line(line.trim()),
            Some(_) => self.parse_clause_line(line),
        };

        if result.is_err() {
            self.error = true;
        }
        result
    }

    /// Verifies the header information when present.
    ///
    /// Using more variables than declared is an error. A wrong clause count is only reported as
    /// a warning, as many published benchmark files get it wrong.
    pub fn check_header(&self) -> Result<(), ParserError> {
        if let Some(header) = self.header {
            if self.max_var_count > header.var_count {
                return Err(ParserError::VarCount {
                    var_count: self.max_var_count,
                    header_var_count: header.var_count,
                });
            }

            if self.clause_count != header.clause_count {
                warn!(
                    "Formula has {} clauses while the header specifies {} clauses",
                    self.clause_count, header.clause_count
                );
            }
        }

        Ok(())
    }

    /// Returns the subformula of everything parsed since the last call to this method.
    ///
    /// The variable count of the returned formula covers everything parsed so far, including the
    /// variables declared by the header.
    pub fn take_formula(&mut self) -> CnfFormula {
        let mut new_formula = CnfFormula::new();
        new_formula.set_var_count(self.formula.var_count());
        replace(&mut self.formula, new_formula)
    }

    /// Return the DIMACS CNF header data if present.
    pub fn header(&self) -> Option<DimacsHeader> {
        self.header
    }

    /// Number of clauses parsed.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Number of variables, including those declared by the header.
    pub fn var_count(&self) -> usize {
        self.formula.var_count()
    }

    fn parse_clause_line(&mut self, line: &str) -> Result<(), ParserError> {
        let mut tokens = line.split_whitespace().collect::<Vec<_>>();

        if tokens.pop() != Some("0") {
            return Err(ParserError::UnterminatedClause {
                line: self.line_number,
            });
        }

        let mut clause = Vec::with_capacity(tokens.len());
        for token in tokens {
            clause.push(self.parse_lit(token)?);
        }

        for lit in clause.iter() {
            self.max_var_count = self.max_var_count.max(lit.index() + 1);
        }
        self.formula.add_clause(clause);
        self.clause_count += 1;

        Ok(())
    }

    fn parse_lit(&self, token: &str) -> Result<Lit, ParserError> {
        let unexpected = || ParserError::UnexpectedInput {
            line: self.line_number,
            token: token.to_owned(),
        };

        let digits = token.strip_prefix('-').unwrap_or(token);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(unexpected());
        }

        let too_large = || ParserError::LiteralTooLarge {
            line: self.line_number,
            literal: token.to_owned(),
        };

        let number: isize = token.parse().map_err(|_| too_large())?;
        if number == 0 {
            return Err(unexpected());
        }
        if number.unsigned_abs() > Var::max_count() {
            return Err(too_large());
        }

        Ok(Lit::from_dimacs(number))
    }

    fn parse_header_line(&mut self, header_line: &str) -> Result<(), ParserError> {
        if self.header.is_some() {
            return Err(ParserError::DuplicateHeader {
                line: self.line_number,
            });
        }

        let invalid_header = || ParserError::InvalidHeader {
            line: self.line_number,
            header: header_line.to_owned(),
        };

        let values = header_line.split_whitespace().collect::<Vec<_>>();

        let (var_count, clause_count) = match values[..] {
            ["p", "cnf", var_count, clause_count] => (var_count, clause_count),
            _ => return Err(invalid_header()),
        };

        let var_count: usize = var_count.parse().map_err(|_| invalid_header())?;
        let clause_count: usize = clause_count.parse().map_err(|_| invalid_header())?;

        if var_count > Var::max_count() {
            return Err(ParserError::LiteralTooLarge {
                line: self.line_number,
                literal: var_count.to_string(),
            });
        }

        self.header = Some(DimacsHeader {
            var_count,
            clause_count,
        });

        self.formula.set_var_count(var_count);

        Ok(())
    }
}

/// Write a DIMACS CNF header.
///
/// Can be used with [`write_dimacs_clauses`] to implement incremental writing.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    writeln!(
        target,
        "p cnf {var_count} {clause_count}",
        var_count = header.var_count,
        clause_count = header.clause_count
    )
}

/// Write an iterator of clauses as headerless DIMACS CNF, one clause per line.
pub fn write_dimacs_clauses(
    target: &mut impl io::Write,
    clauses: impl IntoIterator<Item = impl IntoIterator<Item = impl Borrow<Lit>>>,
) -> io::Result<()> {
    for clause in clauses.into_iter() {
        for lit in clause.into_iter() {
            itoa::write(&mut *target, lit.borrow().to_dimacs())?;
            target.write_all(b" ")?;
        }
        target.write_all(b"0\n")?;
    }
    Ok(())
}

/// Write a formula as DIMACS CNF.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    write_dimacs_header(
        &mut *target,
        DimacsHeader {
            var_count: formula.var_count(),
            clause_count: formula.len(),
        },
    )?;
    write_dimacs_clauses(&mut *target, formula.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Error;
    use proptest::{test_runner::TestCaseError, *};

    use dpll_formula::{cnf::strategy::*, cnf_formula, lit};

    #[test]
    fn odd_whitespace() -> Result<(), Error> {
        let parsed = DimacsParser::parse(
            b"c leading comment\np  cnf  4   3  \n  1  2 3 0\n\n-4\t0\n2 0  \nccomment  \n" as &[_],
        )?;

        let expected = cnf_formula![
            1, 2, 3;
            -4;
            2;
        ];

        assert_eq!(parsed, expected);

        Ok(())
    }

    #[test]
    fn satlib_trailer() -> Result<(), Error> {
        let parsed =
            DimacsParser::parse(b"c uf3\np cnf 3 2\n 1 -2 3 0\n-1 2 0\n%\n0\n\n" as &[_])?;

        let expected = cnf_formula![
            1, -2, 3;
            -1, 2;
        ];

        assert_eq!(parsed, expected);

        Ok(())
    }

    #[test]
    fn header_declares_unused_vars() -> Result<(), Error> {
        let mut parser = DimacsParser::parse_incremental(b"p cnf 10 1\n3 -1 0\n" as &[_], |_| {
            Ok(())
        })?;

        assert_eq!(
            parser.header(),
            Some(DimacsHeader {
                var_count: 10,
                clause_count: 1
            })
        );
        assert_eq!(parser.clause_count(), 1);
        assert_eq!(parser.var_count(), 10);
        assert_eq!(parser.take_formula().var_count(), 10);

        Ok(())
    }

    #[test]
    fn headerless_input() -> Result<(), Error> {
        let parsed = DimacsParser::parse(b"1 -5 0\n" as &[_])?;
        assert_eq!(parsed.var_count(), 5);
        assert_eq!(parsed.len(), 1);
        Ok(())
    }

    #[test]
    fn clause_count_mismatch_is_accepted() -> Result<(), Error> {
        let parsed = DimacsParser::parse(b"p cnf 2 5\n1 2 0\n" as &[_])?;
        assert_eq!(parsed.len(), 1);
        Ok(())
    }

    fn parse_error(input: impl AsRef<[u8]>) -> ParserError {
        match DimacsParser::parse(input.as_ref()) {
            Ok(parsed) => panic!("parsed invalid input as {:?}", parsed),
            Err(err) => err
                .downcast::<ParserError>()
                .unwrap_or_else(|err| panic!("unexpected error type {:?}", err)),
        }
    }

    #[test]
    fn invalid_headers() {
        for &input in [
            "pcnf 1 3",
            "p notcnf 1 3",
            "p cnf 1",
            "p cnf 1 2 3",
            "p cnf foo bar",
            "p cnf -3 -6",
            "p cnf 4 18446744073709551616",
        ]
        .iter()
        {
            match parse_error(input) {
                ParserError::InvalidHeader { line: 1, header } => assert_eq!(header, input),
                err => panic!("{:?} for header {:?}", err, input),
            }
        }

        assert!(matches!(
            parse_error(format!("p cnf {} 4", Var::max_count() + 1)),
            ParserError::LiteralTooLarge { line: 1, .. }
        ));
        assert_eq!(
            DimacsParser::parse(format!("p cnf {} 0", Var::max_count()).as_bytes())
                .map(|formula| formula.var_count())
                .ok(),
            Some(Var::max_count())
        );

        assert!(matches!(
            parse_error("c two headers\np cnf 1 2\np cnf 1 2\n"),
            ParserError::DuplicateHeader { line: 3 }
        ));
    }

    #[test]
    fn too_many_vars() {
        assert!(matches!(
            parse_error("p cnf 1 1\n 2 0"),
            ParserError::VarCount {
                var_count: 2,
                header_var_count: 1
            }
        ));
    }

    #[test]
    fn syntax_errors() {
        let cases = [
            ("1 2 ?foo 0", 1, "?foo"),
            ("c fine\n1 2 - 3 0", 2, "-"),
            ("1 2 --3 0", 1, "--3"),
            ("1 2-3 0", 1, "2-3"),
            ("p cnf 2 2\n1 0 2 0", 2, "0"),
        ];

        for &(input, expected_line, expected_token) in cases.iter() {
            match parse_error(input) {
                ParserError::UnexpectedInput { line, token } => {
                    assert_eq!((line, &token[..]), (expected_line, expected_token))
                }
                err => panic!("{:?} for input {:?}", err, input),
            }
        }
    }

    #[test]
    fn unterminated_clause() {
        assert!(matches!(
            parse_error("1 2 0\n1 2 3\n"),
            ParserError::UnterminatedClause { line: 2 }
        ));
    }

    #[test]
    fn literal_too_large() {
        for input in [
            format!("1 {} 2 0", Var::max_count() + 1),
            "1 -99999999999999999999999 0".to_owned(),
        ]
        .iter()
        {
            assert!(matches!(
                parse_error(input),
                ParserError::LiteralTooLarge { line: 1, .. }
            ));
        }

        let largest = Var::max_var().to_dimacs();
        let parsed = DimacsParser::parse(format!("-{} 1 0", largest).as_bytes()).unwrap();
        assert_eq!(parsed.var_count(), Var::max_count());
        assert_eq!(parsed.iter().next(), Some(&[!Var::max_var().positive(), lit!(1)][..]));
    }

    #[test]
    fn rejects_input_after_error() {
        let mut parser = DimacsParser::new();
        assert!(parser.parse_line("1 x 0").is_err());
        assert!(matches!(
            parser.parse_line("1 0"),
            Err(ParserError::PreviousError)
        ));
    }

    proptest! {
        #[test]
        fn write_then_parse(input in cnf_formula(1..100usize, 0..500, 1..10)) {
            let mut buf = vec![];

            write_dimacs(&mut buf, &input)?;

            let parsed = DimacsParser::parse(&buf[..]).map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(parsed, input);
        }
    }
}
