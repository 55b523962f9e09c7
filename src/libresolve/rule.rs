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

use crate::ast::*;
use crate::attribute::*;
use crate::alternative::*;
use crate::grammar::ActionRegistry;
use crate::diagnostic::StructuralError;

use std::collections::{HashMap, HashSet};
use std::fmt::{Formatter, Display, Error};

/// A rule of the grammar and everything its actions can reference.
///
/// The header fields (`modifiers`, `args`, `retvals`, `scope`, `mode`, ...) are assigned once by the grammar walker, before any resolution happens.
#[derive(Clone, Debug)]
pub struct Rule
{
  pub name: String,
  /// The rule name as it appears in the grammar.
  pub ast: Token,
  /// Unique in the grammar, from 0 to n-1 in declaration order.
  pub index: usize,
  pub modifiers: Vec<Token>,
  pub args: Option<AttributeDict>,
  pub retvals: Option<AttributeDict>,
  /// `scope { int i; }`
  pub scope: Option<AttributeDict>,
  /// Names of the global scopes used by this rule.
  pub use_scopes: Vec<Token>,
  /// Lexer mode of the rule, if any.
  pub mode: Option<String>,
  /// `@init {...}`, `@after {...}`.
  pub named_actions: HashMap<String, ActionAst>,
  pub exception_actions: Vec<ActionAst>,
  pub finally_action: Option<ActionAst>,
  /// No other rule references this one.
  pub is_start_rule: bool,
  /// Last action index assigned to an action of this rule.
  pub action_index: Option<usize>,
  alts: Vec<Alternative>
}

impl Rule
{
  pub fn new(index: usize, name: Token, num_alts: usize) -> Result<Rule, StructuralError> {
    if num_alts == 0 {
      return Err(StructuralError::NoAlternative(name.text));
    }
    Ok(Rule {
      name: name.text.clone(),
      ast: name,
      index: index,
      modifiers: vec![],
      args: None,
      retvals: None,
      scope: None,
      use_scopes: vec![],
      mode: None,
      named_actions: HashMap::new(),
      exception_actions: vec![],
      finally_action: None,
      is_start_rule: true,
      action_index: None,
      alts: (1..=num_alts).map(|alt_num| Alternative::new(index, alt_num)).collect()
    })
  }

  pub fn num_alts(&self) -> usize {
    self.alts.len()
  }

  /// Alternatives are numbered from 1.
  pub fn alt(&self, alt: usize) -> Option<&Alternative> {
    if alt == 0 { None }
    else { self.alts.get(alt - 1) }
  }

  pub fn alts(&self) -> std::slice::Iter<Alternative> {
    self.alts.iter()
  }

  fn alt_mut(&mut self, alt: usize) -> Result<&mut Alternative, StructuralError> {
    let num_alts = self.num_alts();
    if alt == 0 || alt > num_alts {
      Err(StructuralError::AltOutOfRange {
        rule: self.name.clone(),
        alt: alt,
        num_alts: num_alts
      })
    } else {
      Ok(&mut self.alts[alt - 1])
    }
  }

  /// Lexer actions and forced actions are numbered grammar-wide since the generated lexer dispatches on this number. Returns the index assigned, if any.
  pub fn define_action_in_alt(&mut self, registry: &mut ActionRegistry, alt: usize,
    mut action: ActionAst) -> Result<Option<usize>, StructuralError>
  {
    self.alt_mut(alt)?;
    let mut index = None;
    if registry.is_lexer() || action.is_forced() {
      let action_index = registry.register_action(&mut action);
      self.action_index = Some(action_index);
      index = Some(action_index);
    }
    self.alt_mut(alt)?.actions.push(action);
    Ok(index)
  }

  /// Predicates are always numbered grammar-wide.
  pub fn define_predicate_in_alt(&mut self, registry: &mut ActionRegistry, alt: usize,
    mut predicate: ActionAst) -> Result<usize, StructuralError>
  {
    self.alt_mut(alt)?;
    let index = registry.register_predicate(&mut predicate);
    self.alt_mut(alt)?.actions.push(predicate);
    Ok(index)
  }

  pub fn define_label_in_alt(&mut self, alt: usize, label: Token, element: Token,
    kind: LabelType) -> Result<(), StructuralError>
  {
    self.alt_mut(alt)?.define_label(LabelElementPair::new(label, element, kind));
    Ok(())
  }

  pub fn define_token_ref_in_alt(&mut self, alt: usize, token: Token) -> Result<(), StructuralError> {
    self.alt_mut(alt)?.define_token_ref(token);
    Ok(())
  }

  pub fn define_rule_ref_in_alt(&mut self, alt: usize, rule: Token) -> Result<(), StructuralError> {
    self.alt_mut(alt)?.define_rule_ref(rule);
    Ok(())
  }

  pub fn get_token_refs(&self) -> HashSet<String> {
    self.alts.iter()
      .flat_map(|alt| alt.token_refs.keys().cloned())
      .collect()
  }

  pub fn get_rule_refs(&self) -> HashSet<String> {
    self.alts.iter()
      .flat_map(|alt| alt.rule_refs.keys().cloned())
      .collect()
  }

  pub fn get_label_names(&self) -> HashSet<String> {
    self.alts.iter()
      .flat_map(|alt| alt.label_defs.keys().cloned())
      .collect()
  }

  /// All the label definitions of the rule, in alternative order then in definition order. It is computed on each call.
  pub fn get_label_defs(&self) -> HashMap<String, Vec<LabelElementPair>> {
    let mut defs: HashMap<String, Vec<LabelElementPair>> = HashMap::new();
    for alt in &self.alts {
      for (name, pairs) in &alt.label_defs {
        defs.entry(name.clone())
          .or_insert_with(Vec::new)
          .extend(pairs.iter().cloned());
      }
    }
    defs
  }

  /// The first definition of the label `name` in the rule. The other definitions are only relevant for error reporting.
  pub fn get_any_label_def(&self, name: &str) -> Option<&LabelElementPair> {
    self.alts.iter()
      .filter_map(|alt| alt.label_defs.get(name))
      .filter_map(|pairs| pairs.first())
      .next()
  }

  pub fn references_token(&self, name: &str) -> bool {
    self.alts.iter().any(|alt| alt.token_refs.contains_key(name))
  }

  pub fn references_rule(&self, name: &str) -> bool {
    self.alts.iter().any(|alt| alt.rule_refs.contains_key(name))
  }

  /// Every action of the rule: actions and predicates of the alternatives, named actions, exception handlers and the finally action.
  pub fn all_actions(&self) -> Vec<&ActionAst> {
    let mut actions: Vec<&ActionAst> = self.alts.iter()
      .flat_map(|alt| alt.actions.iter())
      .collect();
    let mut named: Vec<(&String, &ActionAst)> = self.named_actions.iter().collect();
    named.sort_by(|a, b| a.0.cmp(b.0));
    actions.extend(named.into_iter().map(|(_, action)| action));
    actions.extend(self.exception_actions.iter());
    actions.extend(self.finally_action.iter());
    actions
  }

  pub fn is_fragment(&self) -> bool {
    self.modifiers.iter().any(|m| m.text == "fragment")
  }
}

impl ItemName for Rule
{
  fn name(&self) -> &str {
    &self.name
  }
}

impl ItemSpan for Rule
{
  fn span(&self) -> Span {
    self.ast.span
  }
}

impl Display for Rule
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_fmt(format_args!("Rule{{name={}", self.name))?;
    if let Some(ref args) = self.args {
      formatter.write_fmt(format_args!(", args={}", args))?;
    }
    if let Some(ref retvals) = self.retvals {
      formatter.write_fmt(format_args!(", retvals={}", retvals))?;
    }
    if let Some(ref scope) = self.scope {
      formatter.write_fmt(format_args!(", scope={}", scope))?;
    }
    formatter.write_str("}")
  }
}
