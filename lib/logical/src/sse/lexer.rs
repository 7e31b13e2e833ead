use crate::sse::SseParseError;

/// A datatype of a literal token, either a full IRI or a prefixed name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum DatatypeToken {
    Iri(String),
    PrefixedName(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Token {
    Open,
    Close,
    /// `<...>`, without the angle brackets.
    Iri(String),
    /// `"..."` with an optional language tag or datatype.
    Literal {
        value: String,
        language: Option<String>,
        datatype: Option<DatatypeToken>,
    },
    /// `?name`
    Variable(String),
    /// `??name`
    NonDistinguishedVariable(String),
    /// `_:label`
    BlankNode(String),
    /// Any other word: operator names, numbers, prefixed names, keywords.
    Symbol(String),
}

/// A token and the byte offset where it starts.
pub(super) type Spanned = (Token, usize);

/// Splits the textual form into tokens.
pub(super) struct Lexer<'input> {
    input: &'input str,
    position: usize,
}

impl<'input> Lexer<'input> {
    pub(super) fn new(input: &'input str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'input str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, SseParseError> {
        Err(SseParseError::syntax(message, self.position))
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                // Comments run until the end of the line.
                Some(';') => {
                    while self.bump().is_some_and(|c| c != '\n') {}
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Spanned>, SseParseError> {
        self.skip_whitespace();
        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            '(' => {
                self.bump();
                Token::Open
            }
            ')' => {
                self.bump();
                Token::Close
            }
            '"' => self.read_literal()?,
            '<' if self.is_iri_start() => Token::Iri(self.read_iri()?),
            '?' => {
                self.bump();
                if self.peek() == Some('?') {
                    self.bump();
                    Token::NonDistinguishedVariable(self.read_word())
                } else {
                    Token::Variable(self.read_word())
                }
            }
            '_' if self.rest().starts_with("_:") => {
                self.position += 2;
                Token::BlankNode(self.read_word())
            }
            _ => Token::Symbol(self.read_word()),
        };
        Ok(Some((token, start)))
    }

    /// `<` starts an IRI unless it is the comparison operator `<` or `<=`.
    fn is_iri_start(&self) -> bool {
        let mut chars = self.rest().chars().skip(1);
        !matches!(chars.next(), None | Some('=' | ')') | Some(' ' | '\t' | '\n' | '\r'))
    }

    fn read_word(&mut self) -> String {
        let start = self.position;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '"'))
        {
            self.bump();
        }
        self.input[start..self.position].to_owned()
    }

    fn read_iri(&mut self) -> Result<String, SseParseError> {
        self.bump();
        let start = self.position;
        loop {
            match self.bump() {
                Some('>') => return Ok(self.input[start..self.position - 1].to_owned()),
                Some(c) if c.is_whitespace() => return self.error("Unterminated IRI"),
                Some(_) => {}
                None => return self.error("Unterminated IRI"),
            }
        }
    }

    fn read_literal(&mut self) -> Result<Token, SseParseError> {
        let value = self.read_string()?;
        let mut language = None;
        let mut datatype = None;
        if self.peek() == Some('@') {
            self.bump();
            language = Some(self.read_word());
        } else if self.rest().starts_with("^^") {
            self.position += 2;
            datatype = Some(if self.peek() == Some('<') {
                DatatypeToken::Iri(self.read_iri()?)
            } else {
                DatatypeToken::PrefixedName(self.read_word())
            });
        }
        Ok(Token::Literal {
            value,
            language,
            datatype,
        })
    }

    fn read_string(&mut self) -> Result<String, SseParseError> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.read_escape()?),
                Some(c) => value.push(c),
                None => return self.error("Unterminated string"),
            }
        }
    }

    fn read_escape(&mut self) -> Result<char, SseParseError> {
        Ok(match self.bump() {
            Some('t') => '\t',
            Some('b') => '\u{08}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{0C}',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => self.read_code_point(4)?,
            Some('U') => self.read_code_point(8)?,
            _ => return self.error("Invalid escape sequence"),
        })
    }

    fn read_code_point(&mut self, length: usize) -> Result<char, SseParseError> {
        let Some(digits) = self.rest().get(..length) else {
            return self.error("Invalid unicode escape");
        };
        let code_point = u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32);
        match code_point {
            Some(c) => {
                self.position += length;
                Ok(c)
            }
            None => self.error("Invalid unicode escape"),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, SseParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .map(|token| token.map(|(token, _)| token))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn comparison_is_not_an_iri() {
        assert_eq!(
            tokens("(< ?a <http://a>)"),
            vec![
                Token::Open,
                Token::Symbol("<".to_owned()),
                Token::Variable("a".to_owned()),
                Token::Iri("http://a".to_owned()),
                Token::Close
            ]
        );
        assert_eq!(tokens("<="), vec![Token::Symbol("<=".to_owned())]);
    }

    #[test]
    fn literals() {
        assert_eq!(
            tokens(r#""a\"bA"@en "1"^^xsd:integer"#),
            vec![
                Token::Literal {
                    value: "a\"bA".to_owned(),
                    language: Some("en".to_owned()),
                    datatype: None
                },
                Token::Literal {
                    value: "1".to_owned(),
                    language: None,
                    datatype: Some(DatatypeToken::PrefixedName("xsd:integer".to_owned()))
                }
            ]
        );
    }

    #[test]
    fn variables_and_blank_nodes() {
        assert_eq!(
            tokens("?x ??y _:b0 path?"),
            vec![
                Token::Variable("x".to_owned()),
                Token::NonDistinguishedVariable("y".to_owned()),
                Token::BlankNode("b0".to_owned()),
                Token::Symbol("path?".to_owned())
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        let error = Lexer::new("(bgp \"abc").find_map(Result::err);
        assert_eq!(
            error,
            Some(SseParseError::syntax("Unterminated string", 9))
        );
    }
}
