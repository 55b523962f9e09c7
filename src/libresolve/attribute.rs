// Copyright 2016 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Attributes are the named values an action can reference: rule arguments, return values, scope members and predefined properties.

use crate::ast::*;
use std::collections::HashMap;
use std::fmt::{Formatter, Display, Error};

#[derive(Clone, Debug)]
pub struct Attribute
{
  pub name: String,
  /// Declared type text, `None` for predefined properties.
  pub ty: Option<String>,
  pub init_value: Option<String>,
  pub span: Span
}

impl Attribute
{
  pub fn new(name: &str) -> Attribute {
    Attribute {
      name: String::from(name),
      ty: None,
      init_value: None,
      span: Span::call_site()
    }
  }

  pub fn typed(ty: &str, name: &str) -> Attribute {
    Attribute {
      ty: Some(String::from(ty)),
      .. Attribute::new(name)
    }
  }
}

impl PartialEq for Attribute
{
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name &&
    self.ty == other.ty &&
    self.init_value == other.init_value
  }
}

impl Eq for Attribute {}

impl ItemName for Attribute
{
  fn name(&self) -> &str {
    &self.name
  }
}

impl ItemSpan for Attribute
{
  fn span(&self) -> Span {
    self.span
  }
}

impl Display for Attribute
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    if let Some(ref ty) = self.ty {
      formatter.write_fmt(format_args!("{} ", ty))?;
    }
    formatter.write_str(&self.name)?;
    if let Some(ref value) = self.init_value {
      formatter.write_fmt(format_args!("={}", value))?;
    }
    Ok(())
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DictType
{
  Arg,
  Retval,
  RuleScope,
  PredefinedRule,
  PredefinedTreeRule,
  PredefinedLexerRule,
  Token
}

/// Ordered collection of attributes.
///
/// Every inserted attribute is kept, even when its name is already taken, so a duplicate can later be reported with its two positions. `get` always answers with the first attribute registered under a name.
#[derive(Clone, Debug)]
pub struct AttributeDict
{
  pub dict_type: DictType,
  pub name: Option<String>,
  attributes: Vec<Attribute>,
  by_name: HashMap<String, usize>
}

impl AttributeDict
{
  pub fn new(dict_type: DictType) -> AttributeDict {
    AttributeDict {
      dict_type: dict_type,
      name: None,
      attributes: vec![],
      by_name: HashMap::new()
    }
  }

  /// A global scope `scope name { ... }`.
  pub fn named_scope(name: &str) -> AttributeDict {
    let mut dict = AttributeDict::new(DictType::RuleScope);
    dict.name = Some(String::from(name));
    dict
  }

  pub fn with_names(dict_type: DictType, names: &[&str]) -> AttributeDict {
    let mut dict = AttributeDict::new(dict_type);
    for name in names {
      dict.add(Attribute::new(name));
    }
    dict
  }

  pub fn add(&mut self, attr: Attribute) {
    let position = self.attributes.len();
    self.by_name.entry(attr.name.clone()).or_insert(position);
    self.attributes.push(attr);
  }

  pub fn get(&self, name: &str) -> Option<&Attribute> {
    self.by_name.get(name).map(|&idx| &self.attributes[idx])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.by_name.contains_key(name)
  }

  /// All the attributes in insertion order, duplicates included.
  pub fn iter(&self) -> std::slice::Iter<Attribute> {
    self.attributes.iter()
  }

  pub fn names(&self) -> Vec<&str> {
    self.attributes.iter().map(|a| a.name.as_str()).collect()
  }

  pub fn len(&self) -> usize {
    self.attributes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty()
  }

  /// Parses a declaration list such as `int x, List<String> names, boolean b = true`.
  ///
  /// Each declaration is split at top-level commas. The trailing identifier is the name, the text before it is the type and the text after a top-level `=` is the initial value. A declaration without type only holds a name.
  pub fn parse_typed_args(dict_type: DictType, text: &str, span: Span) -> AttributeDict {
    let mut dict = AttributeDict::new(dict_type);
    for decl in split_top_level(text, ',') {
      if let Some(mut attr) = parse_declaration(&decl) {
        attr.span = span;
        dict.add(attr);
      }
    }
    dict
  }
}

impl<'a> IntoIterator for &'a AttributeDict
{
  type Item = &'a Attribute;
  type IntoIter = std::slice::Iter<'a, Attribute>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl PartialEq for AttributeDict
{
  fn eq(&self, other: &Self) -> bool {
    self.dict_type == other.dict_type &&
    self.name == other.name &&
    self.attributes == other.attributes
  }
}

impl Display for AttributeDict
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str("[")?;
    for (i, attr) in self.attributes.iter().enumerate() {
      if i > 0 {
        formatter.write_str(", ")?;
      }
      attr.fmt(formatter)?;
    }
    formatter.write_str("]")
  }
}

/// Byte position of the first `separator` outside of brackets and string literals.
fn find_top_level(text: &str, separator: char) -> Option<usize> {
  let mut depth = 0i32;
  let mut in_string: Option<char> = None;
  let mut escaped = false;
  for (i, c) in text.char_indices() {
    if let Some(quote) = in_string {
      if escaped { escaped = false; }
      else if c == '\\' { escaped = true; }
      else if c == quote { in_string = None; }
      continue;
    }
    match c {
      '"' | '\'' => in_string = Some(c),
      '<' | '(' | '[' | '{' => depth += 1,
      '>' | ')' | ']' | '}' => depth -= 1,
      c if c == separator && depth == 0 => return Some(i),
      _ => ()
    }
  }
  None
}

fn split_top_level(text: &str, separator: char) -> Vec<String> {
  let mut parts = vec![];
  let mut rest = text;
  while let Some(i) = find_top_level(rest, separator) {
    parts.push(rest[..i].trim().to_string());
    rest = &rest[i + separator.len_utf8()..];
  }
  parts.push(rest.trim().to_string());
  parts.into_iter().filter(|p| !p.is_empty()).collect()
}

fn is_ident_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// `type name suffix = value` where a suffix such as `[]` belongs to the type.
fn parse_declaration(decl: &str) -> Option<Attribute> {
  // Only the first `=` separates the name from the initial value: `b = x == y`.
  let (decl, init_value) = match find_top_level(decl, '=') {
    Some(i) => (&decl[..i], Some(decl[i + 1..].trim()).filter(|v| !v.is_empty())),
    None => (decl, None)
  };
  let decl = decl.trim_end();
  let name_end = decl.char_indices()
    .rev()
    .find(|&(_, c)| is_ident_char(c))
    .map(|(i, c)| i + c.len_utf8())?;
  let name_start = decl[..name_end].char_indices()
    .rev()
    .take_while(|&(_, c)| is_ident_char(c))
    .last()
    .map(|(i, _)| i)?;
  let name = &decl[name_start..name_end];
  let ty = format!("{}{}", decl[..name_start].trim(), decl[name_end..].trim());
  let mut attr = Attribute::new(name);
  if !ty.is_empty() {
    attr.ty = Some(ty);
  }
  attr.init_value = init_value.map(String::from);
  Some(attr)
}
