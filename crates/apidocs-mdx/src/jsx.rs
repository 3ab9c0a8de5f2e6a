//! MDX syntax that is not Markdown: ESM statements and JSX elements.
//!
//! Pages written for a JS toolchain import their components and render code
//! through `<CodeBlock language="..." code={`...`} />`. Imports mean nothing
//! in a static export, so they are dropped; `<CodeBlock>` elements are
//! rewritten into fenced code blocks.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static CODE_BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<CodeBlock\b").expect("Invalid CodeBlock regex"));

/// A prop value from JSX.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String literal: `language="ts"`, `code={"..."}` or a template literal
    String(String),
    /// Boolean (presence): `showLineNumbers`
    Boolean(bool),
    /// Any other expression: `code={snippet}`
    Expression(String),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A parsed JSX element.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    /// Component name (e.g., "CodeBlock")
    pub name: String,

    /// Props as key-value pairs
    pub props: HashMap<String, PropValue>,

    /// Children, with a single `{`...`}` literal unwrapped
    pub children: Option<String>,

    /// Whether self-closing
    pub self_closing: bool,
}

/// Remove top-level `import`/`export` statements.
///
/// Statements are only recognized at the start of a line outside fenced
/// code. Removed lines are replaced by empty lines so line numbers hold.
pub fn strip_esm(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for (kind, chunk) in fenced_chunks(source) {
        if kind != Chunk::Prose {
            out.push_str(chunk);
            continue;
        }

        let mut statement: Option<EsmStatement> = None;
        for line in chunk.split_inclusive('\n') {
            let consumed = match statement.as_mut() {
                Some(open) => {
                    open.feed(line);
                    true
                }
                None if is_esm_start(line) => {
                    let mut open = EsmStatement::new(line);
                    open.feed(line);
                    statement = Some(open);
                    true
                }
                None => false,
            };

            if consumed {
                if line.ends_with('\n') {
                    out.push('\n');
                }
                if statement.as_ref().is_some_and(EsmStatement::is_complete) {
                    statement = None;
                }
            } else {
                out.push_str(line);
            }
        }
    }

    out
}

/// Rewrite `<CodeBlock>` elements as fenced code blocks.
///
/// Both `code` props and literal children are accepted:
///
/// ```text
/// <CodeBlock language="typescript" code={`const x = 1;`} />
/// <CodeBlock language="bash">{`curl /books`}</CodeBlock>
/// ```
///
/// Elements whose code is not a literal are left untouched.
pub fn lower_code_block_elements(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for (kind, chunk) in fenced_chunks(source) {
        if kind == Chunk::Fence {
            out.push_str(chunk);
            continue;
        }

        let mut rest = chunk;
        while let Some(m) = CODE_BLOCK_OPEN.find(rest) {
            out.push_str(&rest[..m.start()]);
            let candidate = &rest[m.start()..];

            match parse_element(candidate) {
                Some((element, len)) => {
                    match code_block_fence(&element) {
                        Some(block) => {
                            if !out.is_empty() && !out.ends_with('\n') {
                                out.push('\n');
                            }
                            out.push_str(&block);
                            out.push('\n');
                        }
                        None => out.push_str(&candidate[..len]),
                    }
                    rest = &candidate[len..];
                }
                None => {
                    out.push_str(m.as_str());
                    rest = &rest[m.end()..];
                }
            }
        }
        out.push_str(rest);
    }

    out
}

/// Parse the JSX element at the start of `source`.
///
/// Returns the element and the number of bytes it spans. Children are not
/// searched for nested elements of the same name.
pub fn parse_element(source: &str) -> Option<(JsxElement, usize)> {
    let mut cur = Cursor::new(source);

    if !cur.eat("<") {
        return None;
    }

    let name = cur.take_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }

    let mut props = HashMap::new();
    loop {
        cur.skip_ws();

        if cur.eat("/>") {
            let element = JsxElement {
                name: name.to_string(),
                props,
                children: None,
                self_closing: true,
            };
            return Some((element, cur.pos));
        }
        if cur.eat(">") {
            break;
        }

        let key = cur.take_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if key.is_empty() {
            return None;
        }

        cur.skip_ws();
        let value = if cur.eat("=") {
            cur.skip_ws();
            parse_prop_value(&mut cur)?
        } else {
            PropValue::Boolean(true)
        };
        props.insert(key.to_string(), value);
    }

    let close_tag = format!("</{name}>");
    let close_pos = cur.rest().find(&close_tag)?;
    let children = unwrap_literal(cur.rest()[..close_pos].trim());
    let len = cur.pos + close_pos + close_tag.len();

    let element = JsxElement {
        name: name.to_string(),
        props,
        children,
        self_closing: false,
    };
    Some((element, len))
}

/// Render a `<CodeBlock>` element as a fenced block.
fn code_block_fence(element: &JsxElement) -> Option<String> {
    let code = match element.props.get("code") {
        Some(value) => value.as_str()?.to_string(),
        None => element.children.clone()?,
    };

    let language = element
        .props
        .get("language")
        .and_then(PropValue::as_str)
        .unwrap_or("");

    let code = trim_code(&code);
    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);

    Some(format!("{fence}{language}\n{code}\n{fence}"))
}

/// Drop leading blank lines and trailing whitespace, keep indentation.
fn trim_code(code: &str) -> &str {
    let code = code.trim_end();
    let start = code
        .find(|c: char| !c.is_whitespace())
        .map(|first| code[..first].rfind('\n').map_or(0, |nl| nl + 1))
        .unwrap_or(code.len());
    &code[start..]
}

fn longest_backtick_run(code: &str) -> usize {
    code.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// `{`...`}` or `{"..."}` children become their literal value.
fn unwrap_literal(children: &str) -> Option<String> {
    if children.is_empty() {
        return None;
    }

    if let Some(inner) = children
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    {
        let mut cur = Cursor::new(inner.trim());
        let literal = match cur.peek() {
            Some('`') => parse_template(&mut cur),
            Some('"') | Some('\'') => parse_js_string(&mut cur),
            _ => None,
        };
        if let Some(literal) = literal {
            if cur.rest().trim().is_empty() {
                return Some(literal);
            }
        }
    }

    Some(children.to_string())
}

fn parse_prop_value(cur: &mut Cursor<'_>) -> Option<PropValue> {
    match cur.peek()? {
        quote @ ('"' | '\'') => {
            cur.bump();
            let value = cur.take_while(|c| c != quote);
            cur.bump()?;
            Some(PropValue::String(value.to_string()))
        }
        '{' => {
            cur.bump();
            cur.skip_ws();
            let value = match cur.peek()? {
                '`' => PropValue::String(parse_template(cur)?),
                '"' | '\'' => PropValue::String(parse_js_string(cur)?),
                _ => PropValue::Expression(take_expression(cur)?.trim().to_string()),
            };
            cur.skip_ws();
            cur.eat("}").then_some(value)
        }
        _ => None,
    }
}

/// Template literal body with escapes resolved. `${...}` is kept as written.
fn parse_template(cur: &mut Cursor<'_>) -> Option<String> {
    if !cur.eat("`") {
        return None;
    }

    let mut value = String::new();
    loop {
        match cur.bump()? {
            '`' => return Some(value),
            '\\' => push_escape(&mut value, cur.bump()?),
            c => value.push(c),
        }
    }
}

fn parse_js_string(cur: &mut Cursor<'_>) -> Option<String> {
    let quote = cur.bump()?;

    let mut value = String::new();
    loop {
        match cur.bump()? {
            c if c == quote => return Some(value),
            '\\' => push_escape(&mut value, cur.bump()?),
            c => value.push(c),
        }
    }
}

fn push_escape(value: &mut String, escaped: char) {
    match escaped {
        'n' => value.push('\n'),
        't' => value.push('\t'),
        'r' => value.push('\r'),
        '`' | '$' | '\\' | '"' | '\'' => value.push(escaped),
        other => {
            value.push('\\');
            value.push(other);
        }
    }
}

/// Expression up to the `}` closing the prop, which is left unconsumed.
fn take_expression<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let start = cur.pos;
    let mut depth = 0usize;

    loop {
        match cur.peek()? {
            '}' if depth == 0 => return Some(&cur.src[start..cur.pos]),
            '}' => depth -= 1,
            '{' => depth += 1,
            _ => {}
        }
        cur.bump();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk {
    Prose,
    /// A fenced code block, delimiters included
    Fence,
    /// A complete `<CodeBlock>` element
    Element,
}

/// Split `source` into prose, fenced code and `<CodeBlock>` chunks, in order.
///
/// Fence delimiters inside an element's code belong to the element.
fn fenced_chunks(source: &str) -> Vec<(Chunk, &str)> {
    let mut chunks = Vec::new();
    let mut fence: Option<&'static str> = None;
    let mut chunk_start = 0;
    let mut offset = 0;

    while offset < source.len() {
        let line_end = source[offset..]
            .find('\n')
            .map_or(source.len(), |i| offset + i + 1);
        let line = &source[offset..line_end];
        let trimmed = line.trim_start();

        match fence {
            None => {
                if let Some(marker) = fence_marker(trimmed) {
                    if offset > chunk_start {
                        chunks.push((Chunk::Prose, &source[chunk_start..offset]));
                    }
                    chunk_start = offset;
                    fence = Some(marker);
                } else if let Some((start, end)) = element_in_line(source, offset, line) {
                    if start > chunk_start {
                        chunks.push((Chunk::Prose, &source[chunk_start..start]));
                    }
                    chunks.push((Chunk::Element, &source[start..end]));
                    chunk_start = end;
                    offset = end;
                    continue;
                }
            }
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    chunks.push((Chunk::Fence, &source[chunk_start..line_end]));
                    chunk_start = line_end;
                    fence = None;
                }
            }
        }

        offset = line_end;
    }

    if chunk_start < source.len() {
        let kind = if fence.is_some() {
            Chunk::Fence
        } else {
            Chunk::Prose
        };
        chunks.push((kind, &source[chunk_start..]));
    }

    chunks
}

/// Byte range of the first complete `<CodeBlock>` element opening in `line`.
fn element_in_line(source: &str, offset: usize, line: &str) -> Option<(usize, usize)> {
    CODE_BLOCK_OPEN.find_iter(line).find_map(|m| {
        let start = offset + m.start();
        parse_element(&source[start..]).map(|(_, len)| (start, start + len))
    })
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

fn is_esm_start(line: &str) -> bool {
    line.starts_with("import ") || line.starts_with("import{") || line.starts_with("export ")
}

/// An `import`/`export` statement that may span several lines.
struct EsmStatement {
    is_import: bool,
    depth: i32,
    has_source: bool,
}

impl EsmStatement {
    fn new(first_line: &str) -> Self {
        Self {
            is_import: first_line.starts_with("import"),
            depth: 0,
            has_source: false,
        }
    }

    fn feed(&mut self, line: &str) {
        for c in line.chars() {
            match c {
                '{' | '(' | '[' => self.depth += 1,
                '}' | ')' | ']' => self.depth -= 1,
                _ => {}
            }
        }

        let trimmed = line.trim();
        if trimmed.contains(" from ")
            || trimmed.contains("from\"")
            || trimmed.contains("from'")
            || trimmed.starts_with("import \"")
            || trimmed.starts_with("import '")
        {
            self.has_source = true;
        }
    }

    fn is_complete(&self) -> bool {
        self.depth <= 0 && (!self.is_import || self.has_source)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}
