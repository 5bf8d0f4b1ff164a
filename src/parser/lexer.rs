//! nom parsers for Go-style type expressions and struct tags

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::Error,
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use super::error::LexError;

/// A parsed type expression, still unresolved against the schema's names
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr<'a> {
    Pointer(Box<TypeExpr<'a>>),
    Slice(Box<TypeExpr<'a>>),
    Array(usize, Box<TypeExpr<'a>>),
    Map(Box<TypeExpr<'a>>, Box<TypeExpr<'a>>),
    Interface,
    AnonymousStruct,
    Named {
        package: Option<&'a str>,
        name: &'a str,
    },
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn pointer_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(preceded(char('*'), type_expr), |inner| {
        TypeExpr::Pointer(Box::new(inner))
    })(input)
}

fn slice_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(
        preceded(pair(char('['), preceded(multispace0, char(']'))), type_expr),
        |element| TypeExpr::Slice(Box::new(element)),
    )(input)
}

fn array_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(
        pair(
            delimited(
                char('['),
                delimited(
                    multispace0,
                    map_res(digit1, |digits: &str| digits.parse::<usize>()),
                    multispace0,
                ),
                char(']'),
            ),
            type_expr,
        ),
        |(len, element)| TypeExpr::Array(len, Box::new(element)),
    )(input)
}

fn map_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(
        pair(
            preceded(
                pair(tag("map"), preceded(multispace0, char('['))),
                terminated(type_expr, preceded(multispace0, char(']'))),
            ),
            type_expr,
        ),
        |(key, value)| TypeExpr::Map(Box::new(key), Box::new(value)),
    )(input)
}

fn interface_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(
        tuple((tag("interface"), multispace0, char('{'), multispace0, char('}'))),
        |_| TypeExpr::Interface,
    )(input)
}

fn named_type(input: &str) -> IResult<&str, TypeExpr<'_>> {
    map(
        pair(identifier, opt(preceded(char('.'), identifier))),
        |(first, second)| match (first, second) {
            (package, Some(name)) => TypeExpr::Named {
                package: Some(package),
                name,
            },
            ("any", None) => TypeExpr::Interface,
            ("struct", None) => TypeExpr::AnonymousStruct,
            (name, None) => TypeExpr::Named {
                package: None,
                name,
            },
        },
    )(input)
}

fn type_expr(input: &str) -> IResult<&str, TypeExpr<'_>> {
    preceded(
        multispace0,
        alt((
            pointer_type,
            slice_type,
            array_type,
            map_type,
            interface_type,
            named_type,
        )),
    )(input)
}

fn error_column(source: &str, err: nom::Err<Error<&str>>) -> LexError {
    let column = match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => source.len() - e.input.len() + 1,
        nom::Err::Incomplete(_) => source.len() + 1,
    };
    LexError { column }
}

/// Parse a complete type expression such as `[]*Child` or `map[string]interface{}`
pub fn parse_type_expression(input: &str) -> Result<TypeExpr<'_>, LexError> {
    all_consuming(terminated(type_expr, multispace0))(input)
        .map(|(_, expr)| expr)
        .map_err(|err| error_column(input, err))
}

fn tag_pair(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        multispace0,
        separated_pair(
            take_while1(|c: char| c != ':' && c != '"' && !c.is_whitespace()),
            char(':'),
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        ),
    )(input)
}

/// Split a struct tag like `json:"name,omitempty" yaml:"name"` into key/value pairs
pub fn parse_struct_tag(input: &str) -> Result<Vec<(&str, &str)>, LexError> {
    all_consuming(terminated(many0(tag_pair), multispace0))(input)
        .map(|(_, pairs)| pairs)
        .map_err(|err| error_column(input, err))
}

/// Value stored under `key` in a parsed struct tag
pub fn lookup_tag<'a>(pairs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}
