use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, take_till1},
    character::complete::{anychar, char, multispace0},
    combinator::{map, opt, value},
    multi::separated_list0,
    sequence::{delimited, pair, terminated},
    IResult,
};

/// Quoted item with backslash escapes, either quote style
fn quoted(quote: char) -> impl FnMut(&str) -> IResult<&str, String> {
    let stop: &'static str = if quote == '\'' { "\\'" } else { "\\\"" };
    move |input| {
        delimited(
            char(quote),
            map(
                opt(escaped_transform(
                    is_not(stop),
                    '\\',
                    alt((value('\n', char('n')), value('\t', char('t')), anychar)),
                )),
                Option::unwrap_or_default,
            ),
            char(quote),
        )(input)
    }
}

/// Unquoted item such as `None` or a number
fn bare(input: &str) -> IResult<&str, String> {
    map(take_till1(|c| c == ',' || c == ']'), |s: &str| s.trim().to_string())(input)
}

fn item(input: &str) -> IResult<&str, String> {
    delimited(multispace0, alt((quoted('\''), quoted('"'), bare)), multispace0)(input)
}

/// Parse a list literal such as `['cds_5', "tail fiber", None]`
pub fn parse_list_literal(input: &str) -> IResult<&str, Vec<String>> {
    delimited(
        pair(multispace0, char('[')),
        terminated(separated_list0(char(','), item), opt(pair(char(','), multispace0))),
        pair(multispace0, char(']')),
    )(input)
}

/// First element of an annotation list: the gene-call label
pub fn gene_call_label(annotations: &str) -> Option<String> {
    match parse_list_literal(annotations) {
        Ok((rest, items)) if rest.trim().is_empty() => items.into_iter().next().filter(|s| !s.is_empty()),
        _ => None,
    }
}
