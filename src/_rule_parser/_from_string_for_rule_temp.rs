use crate::BinaryOp::*;
use crate::ParseError;
use crate::_rule_parser::RuleTemp;
use crate::_rule_parser::RuleTemp::*;
use std::convert::TryFrom;
use std::iter::Peekable;
use std::str::Chars;

impl TryFrom<&str> for RuleTemp {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let tokens = tokenize_rule_group(&mut value.chars().peekable(), true)
            .map_err(|e| ParseError::new(value, e))?;
        let rule = parse_rule(&tokens).map_err(|e| ParseError::new(value, e))?;
        Ok(*rule)
    }
}

/// **(internal)** An enum of possible tokens occurring in a string representation of
/// an `UpdateRule`.
#[derive(Debug, Eq, PartialEq)]
enum Token {
    Not,                // '!', '~', 'not'
    And,                // '&', '&&', 'and'
    Or,                 // '|', '||', 'or'
    Xor,                // '^'
    Imp,                // '=>'
    Iff,                // '<=>'
    Name(String),       // 'name'
    Tokens(Vec<Token>), // A block of tokens inside parentheses
}

/// **(internal)** Process a peekable iterator of characters into a vector of `Token`s.
///
/// The outer method always consumes the opening parenthesis and the recursive call consumes the
/// closing parenthesis. Use `top_level` to indicate that there will be no closing parenthesis.
fn tokenize_rule_group(data: &mut Peekable<Chars>, top_level: bool) -> Result<Vec<Token>, String> {
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => { /* Skip whitespace */ }
            '!' | '~' => output.push(Token::Not),
            '^' => output.push(Token::Xor),
            '&' => {
                if data.peek() == Some(&'&') {
                    data.next();
                }
                output.push(Token::And);
            }
            '|' => {
                if data.peek() == Some(&'|') {
                    data.next();
                }
                output.push(Token::Or);
            }
            '=' => {
                if Some('>') == data.next() {
                    output.push(Token::Imp);
                } else {
                    return Err("Expected '>' after '='.".to_string());
                }
            }
            '<' => {
                if Some('=') == data.next() {
                    if Some('>') == data.next() {
                        output.push(Token::Iff)
                    } else {
                        return Err("Expected '>' after '<='.".to_string());
                    }
                } else {
                    return Err("Expected '=' after '<'.".to_string());
                }
            }
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err("Unexpected ')'.".to_string())
                };
            }
            '(' => {
                let tokens = tokenize_rule_group(data, false)?;
                output.push(Token::Tokens(tokens));
            }
            c if is_valid_in_name(c) => {
                let mut name = vec![c];
                while let Some(c) = data.peek() {
                    if !is_valid_in_name(*c) {
                        break;
                    } else {
                        name.push(*c);
                        data.next();
                    }
                }
                let token = word_token(name.into_iter().collect());
                if let Token::Name(name) = &token {
                    // A name directly followed by an argument list.
                    if data.peek() == Some(&'(') {
                        return Err(function_call_error(name));
                    }
                }
                output.push(token);
            }
            _ => return Err(format!("Unexpected '{}'.", c)),
        }
    }
    if top_level {
        Ok(output)
    } else {
        Err("Expected ')'.".to_string())
    }
}

/// **(internal)** Check if given char can appear in a name.
fn is_valid_in_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// **(internal)** Turn a word into an operator token if it is one of the keyword operators.
fn word_token(name: String) -> Token {
    if name.eq_ignore_ascii_case("and") {
        Token::And
    } else if name.eq_ignore_ascii_case("or") {
        Token::Or
    } else if name.eq_ignore_ascii_case("not") {
        Token::Not
    } else {
        Token::Name(name)
    }
}

fn function_call_error(name: &str) -> String {
    format!(
        "Unknown operator `{}(...)`. Function calls are not supported.",
        name
    )
}

/// **(internal)** Returns the value of a constant literal, if `name` is one.
pub(crate) fn constant_value(name: &str) -> Option<bool> {
    if name == "1" || name.eq_ignore_ascii_case("true") {
        Some(true)
    } else if name == "0" || name.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// **(internal)** Parse a `RuleTemp` using the recursive steps.
fn parse_rule(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    iff(data)
}

/// **(internal)** Utility method to find first occurrence of a specific token in the token tree.
fn index_of_first(data: &[Token], token: Token) -> Option<usize> {
    data.iter().position(|t| *t == token)
}

/// **(internal)** Recursive parsing step 1: extract `<=>` operators.
fn iff(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    let iff_token = index_of_first(data, Token::Iff);
    Ok(if let Some(i) = iff_token {
        Box::new(Binary(Iff, imp(&data[..i])?, iff(&data[(i + 1)..])?))
    } else {
        imp(data)?
    })
}

/// **(internal)** Recursive parsing step 2: extract `=>` operators.
fn imp(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    let imp_token = index_of_first(data, Token::Imp);
    Ok(if let Some(i) = imp_token {
        Box::new(Binary(Imp, or(&data[..i])?, imp(&data[(i + 1)..])?))
    } else {
        or(data)?
    })
}

/// **(internal)** Recursive parsing step 3: extract `|` operators.
fn or(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    let or_token = index_of_first(data, Token::Or);
    Ok(if let Some(i) = or_token {
        Box::new(Binary(Or, and(&data[..i])?, or(&data[(i + 1)..])?))
    } else {
        and(data)?
    })
}

/// **(internal)** Recursive parsing step 4: extract `&` operators.
fn and(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    let and_token = index_of_first(data, Token::And);
    Ok(if let Some(i) = and_token {
        Box::new(Binary(And, xor(&data[..i])?, and(&data[(i + 1)..])?))
    } else {
        xor(data)?
    })
}

/// **(internal)** Recursive parsing step 5: extract `^` operators.
fn xor(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    let xor_token = index_of_first(data, Token::Xor);
    Ok(if let Some(i) = xor_token {
        Box::new(Binary(Xor, terminal(&data[..i])?, xor(&data[(i + 1)..])?))
    } else {
        terminal(data)?
    })
}

/// **(internal)** Recursive parsing step 6: extract terminals and negations.
fn terminal(data: &[Token]) -> Result<Box<RuleTemp>, String> {
    if data.is_empty() {
        return Err("Expected formula, found nothing.".to_string());
    }
    if data[0] == Token::Not {
        return Ok(Box::new(Not(terminal(&data[1..])?)));
    }
    if data.len() == 1 {
        // This should be either a name or a parenthesis group, anything else does not make sense.
        match &data[0] {
            Token::Name(name) => {
                return Ok(Box::new(match constant_value(name) {
                    Some(value) => Const(value),
                    None => Var(name.clone()),
                }));
            }
            Token::Tokens(inner) => return parse_rule(inner),
            _ => {} // otherwise, fall through to the error at the end.
        }
    } else if data.len() == 2 {
        if let (Token::Name(name), Token::Tokens(_)) = (&data[0], &data[1]) {
            return Err(function_call_error(name));
        }
    }
    Err(format!("Unexpected: {:?}. Expecting formula.", data))
}

#[cfg(test)]
mod tests {
    use crate::BinaryOp;
    use crate::_rule_parser::RuleTemp;
    use std::convert::TryFrom;

    #[test]
    fn parse_update_rule_basic() {
        let inputs = vec![
            "x0",
            "!x0",
            "(x0 | x1)",
            "(xyz123 & abc)",
            "(a ^ b)",
            "(a => b)",
            "(a <=> b)",
            "(a <=> !(b => (c ^ d)))",
        ];
        for str in inputs {
            assert_eq!(str, format!("{}", RuleTemp::try_from(str).unwrap()))
        }
    }

    #[test]
    fn parse_alternative_syntax() {
        assert_eq!(
            "((x0 & !x1) | x2)",
            RuleTemp::try_from("(x0 & ~x1) | x2").unwrap().to_string()
        );
        assert_eq!(
            "((x0 & !x1) | x2)",
            RuleTemp::try_from("x0 && not x1 || x2").unwrap().to_string()
        );
        assert_eq!(
            "((x0 & x1) | !x2)",
            RuleTemp::try_from("x0 AND x1 or NOT x2").unwrap().to_string()
        );
    }

    #[test]
    fn update_rule_constants() {
        for text in ["0", "false", "FALSE", "False"] {
            assert_eq!(RuleTemp::try_from(text).unwrap(), RuleTemp::Const(false));
        }
        for text in ["1", "true", "TRUE", "True"] {
            assert_eq!(RuleTemp::try_from(text).unwrap(), RuleTemp::Const(true));
        }
        assert_eq!(
            RuleTemp::try_from("x | FALSE").unwrap(),
            RuleTemp::Binary(
                BinaryOp::Or,
                Box::new(RuleTemp::Var("x".to_string())),
                Box::new(RuleTemp::Const(false)),
            )
        );
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(RuleTemp::try_from("a = b").is_err());
        assert!(RuleTemp::try_from("a > b").is_err());
        assert!(RuleTemp::try_from("a <= b").is_err());
        assert!(RuleTemp::try_from("a <- b").is_err());
        assert!(RuleTemp::try_from("a ? b").is_err());
        assert!(RuleTemp::try_from("a + b").is_err());
        assert!(RuleTemp::try_from("a, b").is_err());
    }

    #[test]
    fn test_unknown_operators() {
        let error = RuleTemp::try_from("f(a, b)").unwrap_err();
        assert_eq!("f(a, b)", error.expression());
        assert!(error.message().contains("`f(...)`"));
        let error = RuleTemp::try_from("a & g(b)").unwrap_err();
        assert!(error.message().contains("`g(...)`"));
        let error = RuleTemp::try_from("a | h (b)").unwrap_err();
        assert!(error.message().contains("`h(...)`"));
        // Keyword operators may be followed by a parenthesis group.
        assert_eq!(
            "(!(a & b) | c)",
            RuleTemp::try_from("not(a & b) or(c)").unwrap().to_string()
        );
    }

    #[test]
    fn test_invalid_parentheses() {
        assert!(RuleTemp::try_from("a & (b <=> c").is_err());
        assert!(RuleTemp::try_from("(f => g))").is_err());
        assert!(RuleTemp::try_from("a | (b) ^ g)").is_err());
        assert!(RuleTemp::try_from("()").is_err());
    }

    #[test]
    fn test_missing_formula() {
        assert!(RuleTemp::try_from("").is_err());
        assert!(RuleTemp::try_from("a & | g").is_err());
        assert!(RuleTemp::try_from("a &").is_err());
        assert!(RuleTemp::try_from("a & !").is_err());
        assert!(RuleTemp::try_from("a & a b c").is_err());
        assert!(RuleTemp::try_from("a & ^x").is_err());
        assert!(RuleTemp::try_from("a & x^").is_err());
    }

    #[test]
    fn operator_priority_test() {
        let formula = "a & b | c => d ^ e <=> f";
        let expected = "((((a & b) | c) => (d ^ e)) <=> f)".to_string();
        assert_eq!(expected, RuleTemp::try_from(formula).unwrap().to_string());
    }
}
