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

//! Resolution of the references found in the actions of a rule.
//!
//! Every query is a lookup: a reference that denotes nothing gives `None` (or `false`) and it is up to the caller to turn it into a diagnostic positioned with `node`.

use crate::ast::*;
use crate::attribute::*;
use crate::rule::*;
use crate::grammar::*;
use tracing::trace;

pub trait AttributeResolver
{
  /// `$x`: argument, then return value, then predefined rule property.
  fn resolve_to_attribute(&self, x: &str, node: &ActionAst) -> Option<&Attribute>;

  /// `$x.y`: `x` is the rule itself, a label or a referenced rule or token.
  fn resolve_qualified_attribute(&self, x: &str, y: &str, node: &ActionAst) -> Option<&Attribute>;

  /// `$x::y`: the local scope of the rule `x` or the global scope `x`.
  fn resolve_to_dynamic_scope(&self, x: &str, node: &ActionAst) -> Option<&AttributeDict>;

  fn resolves_to_label(&self, x: &str, node: &ActionAst) -> bool;
  fn resolves_to_list_label(&self, x: &str, node: &ActionAst) -> bool;
  fn resolves_to_token(&self, x: &str, node: &ActionAst) -> bool;
  fn resolves_to_attribute_dict(&self, x: &str, node: &ActionAst) -> bool;

  fn resolve_to_rule(&self, x: &str) -> Option<&Rule>;
}

/// Resolves references in the scope of one rule of a grammar.
#[derive(Clone, Copy)]
pub struct RuleResolver<'a>
{
  grammar: &'a Grammar,
  rule: &'a Rule
}

impl<'a> RuleResolver<'a>
{
  pub fn new(grammar: &'a Grammar, rule: &'a Rule) -> Self {
    RuleResolver { grammar, rule }
  }

  pub fn rule(&self) -> &'a Rule {
    self.rule
  }

  pub fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  /// `$r.y` where `r` is a reference to `target`: its return values first, then its predefined properties.
  pub fn resolve_retval_or_property(&self, target: &'a Rule, y: &str) -> Option<&'a Attribute> {
    target.retvals.as_ref()
      .and_then(|retvals| retvals.get(y))
      .or_else(|| self.grammar.predefined.rule_scope().get(y))
  }

  fn resolve_in_label(&self, label: &'a LabelElementPair, y: &str) -> Option<&'a Attribute> {
    if label.kind == RuleLabel {
      self.grammar.get_rule(&label.element.text)
        .and_then(|target| self.resolve_retval_or_property(target, y))
    }
    else {
      self.grammar.predefined.get(label.kind)
        .and_then(|scope| scope.get(y))
    }
  }

  fn miss<T>(&self, reference: &str, node: &ActionAst) -> Option<T> {
    trace!(rule = %self.rule.name, reference, action = ?node.span, "unresolved reference");
    None
  }
}

impl<'a> AttributeResolver for RuleResolver<'a>
{
  fn resolve_to_attribute(&self, x: &str, node: &ActionAst) -> Option<&Attribute> {
    let rule = self.rule;
    rule.args.as_ref().and_then(|args| args.get(x))
      .or_else(|| rule.retvals.as_ref().and_then(|retvals| retvals.get(x)))
      .or_else(|| self.grammar.predefined.rule_scope().get(x))
      .or_else(|| self.miss(x, node))
  }

  fn resolve_qualified_attribute(&self, x: &str, y: &str, node: &ActionAst) -> Option<&Attribute> {
    if x == self.rule.name {
      return self.resolve_to_attribute(y, node);
    }
    let attr =
      if let Some(label) = self.rule.get_any_label_def(x) {
        self.resolve_in_label(label, y)
      }
      else if self.rule.references_rule(x) {
        self.grammar.get_rule(x)
          .and_then(|target| self.resolve_retval_or_property(target, y))
      }
      else if self.rule.references_token(x) {
        self.grammar.predefined.get(TokenLabel)
          .and_then(|scope| scope.get(y))
      }
      else {
        None
      };
    attr.or_else(|| self.miss(&format!("{}.{}", x, y), node))
  }

  fn resolve_to_dynamic_scope(&self, x: &str, node: &ActionAst) -> Option<&AttributeDict> {
    self.resolve_to_rule(x)
      .and_then(|rule| rule.scope.as_ref())
      .or_else(|| self.grammar.scopes.get(x))
      .or_else(|| self.miss(x, node))
  }

  /// Labels are classified by the more specific queries below.
  fn resolves_to_label(&self, _x: &str, _node: &ActionAst) -> bool {
    false
  }

  fn resolves_to_list_label(&self, x: &str, _node: &ActionAst) -> bool {
    self.rule.get_any_label_def(x)
      .map_or(false, |label| label.kind == RuleListLabel || label.kind == TokenListLabel)
  }

  fn resolves_to_token(&self, x: &str, _node: &ActionAst) -> bool {
    self.rule.get_any_label_def(x)
      .map_or(false, |label| label.kind == TokenLabel)
  }

  fn resolves_to_attribute_dict(&self, x: &str, node: &ActionAst) -> bool {
    self.resolves_to_token(x, node)
    // `$r` in an action of the rule `r`.
    || x == self.rule.name
    || self.rule.scope.is_some()
    || self.grammar.scopes.contains_key(x)
  }

  fn resolve_to_rule(&self, x: &str) -> Option<&Rule> {
    if x == self.rule.name {
      return Some(self.rule);
    }
    match self.rule.get_any_label_def(x) {
      Some(label) if label.kind == RuleLabel => self.grammar.get_rule(&label.element.text),
      _ => self.grammar.get_rule(x)
    }
  }
}
