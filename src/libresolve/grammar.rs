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
use crate::scope::*;
use crate::rule::*;
use crate::resolver::RuleResolver;
use crate::diagnostic::StructuralError;

use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct GrammarAttributes
{
  pub print_rules: PrintLevel
}

/// Grammar-wide numbering of actions and predicates. The generated code refers to them by number.
#[derive(Clone, Debug)]
pub struct ActionRegistry
{
  lexer: bool,
  actions: Vec<ActionAst>,
  predicates: Vec<ActionAst>
}

impl ActionRegistry
{
  pub fn new(kind: GrammarKind) -> ActionRegistry {
    ActionRegistry {
      lexer: kind.is_lexer(),
      actions: vec![],
      predicates: vec![],
    }
  }

  pub fn is_lexer(&self) -> bool {
    self.lexer
  }

  /// Gives the next action index, starting at 1, to `action`.
  pub fn register_action(&mut self, action: &mut ActionAst) -> usize {
    let index = self.actions.len() + 1;
    action.index = Some(index);
    self.actions.push(action.clone());
    debug!(index, "action registered");
    index
  }

  /// Gives the next predicate index, starting at 1, to `predicate`.
  pub fn register_predicate(&mut self, predicate: &mut ActionAst) -> usize {
    let index = self.predicates.len() + 1;
    predicate.index = Some(index);
    self.predicates.push(predicate.clone());
    debug!(index, "predicate registered");
    index
  }

  pub fn num_actions(&self) -> usize {
    self.actions.len()
  }

  pub fn num_predicates(&self) -> usize {
    self.predicates.len()
  }

  pub fn action(&self, index: usize) -> Option<&ActionAst> {
    if index == 0 { None }
    else { self.actions.get(index - 1) }
  }

  pub fn predicate(&self, index: usize) -> Option<&ActionAst> {
    if index == 0 { None }
    else { self.predicates.get(index - 1) }
  }
}

/// The rule table of a grammar. Rules refer to each other by name through this table.
#[derive(Clone, Debug)]
pub struct Grammar
{
  pub name: String,
  pub kind: GrammarKind,
  pub rules: Vec<Rule>,
  rules_by_name: HashMap<String, usize>,
  /// Global scopes `scope name { ... }`.
  pub scopes: HashMap<String, AttributeDict>,
  pub predefined: PredefinedScopes,
  pub registry: ActionRegistry,
  pub attributes: GrammarAttributes
}

impl Grammar
{
  pub fn new(name: &str, kind: GrammarKind) -> Grammar {
    Grammar {
      name: String::from(name),
      kind: kind,
      rules: vec![],
      rules_by_name: HashMap::new(),
      scopes: HashMap::new(),
      predefined: PredefinedScopes::new(kind),
      registry: ActionRegistry::new(kind),
      attributes: GrammarAttributes::default()
    }
  }

  pub fn is_lexer(&self) -> bool {
    self.kind.is_lexer()
  }

  /// Declares a new rule and returns its index. A rule declared twice is kept, so it can be reported, but the name lookup keeps answering with the first declaration.
  pub fn define_rule(&mut self, name: Token, num_alts: usize) -> Result<usize, StructuralError> {
    let index = self.rules.len();
    let rule = Rule::new(index, name, num_alts)?;
    self.rules_by_name.entry(rule.name.clone()).or_insert(index);
    self.rules.push(rule);
    Ok(index)
  }

  pub fn get_rule(&self, name: &str) -> Option<&Rule> {
    self.rules_by_name.get(name).map(|&idx| &self.rules[idx])
  }

  pub fn rule_index(&self, name: &str) -> Option<usize> {
    self.rules_by_name.get(name).cloned()
  }

  /// Panics if `index` was not given by `define_rule`.
  pub fn rule(&self, index: usize) -> &Rule {
    &self.rules[index]
  }

  /// Panics if `index` was not given by `define_rule`.
  pub fn rule_mut(&mut self, index: usize) -> &mut Rule {
    &mut self.rules[index]
  }

  pub fn define_scope(&mut self, name: &str, mut scope: AttributeDict) {
    scope.name = Some(String::from(name));
    self.scopes.insert(String::from(name), scope);
  }

  pub fn define_action_in_alt(&mut self, rule: usize, alt: usize, action: ActionAst)
    -> Result<Option<usize>, StructuralError>
  {
    let registry = &mut self.registry;
    Grammar::registered_rule(&mut self.rules, rule)?.define_action_in_alt(registry, alt, action)
  }

  pub fn define_predicate_in_alt(&mut self, rule: usize, alt: usize, predicate: ActionAst)
    -> Result<usize, StructuralError>
  {
    let registry = &mut self.registry;
    Grammar::registered_rule(&mut self.rules, rule)?.define_predicate_in_alt(registry, alt, predicate)
  }

  fn registered_rule(rules: &mut [Rule], index: usize) -> Result<&mut Rule, StructuralError> {
    let num_rules = rules.len();
    rules.get_mut(index)
      .ok_or(StructuralError::RuleOutOfRange { rule: index, num_rules: num_rules })
  }

  /// Resolution of the references appearing in the actions of the rule `rule`. Panics if `rule` was not given by `define_rule`.
  pub fn resolver(&self, rule: usize) -> RuleResolver {
    RuleResolver::new(self, &self.rules[rule])
  }

  pub fn merge_print_rules(&mut self, level: PrintLevel) {
    self.attributes.print_rules = self.attributes.print_rules.merge(level);
  }
}

#[cfg(test)]
mod test
{
  use super::*;
  use quote::quote;

  #[test]
  fn lexer_actions_are_numbered_across_rules() {
    let mut grammar = Grammar::new("L", GrammarKind::Lexer);
    let a = grammar.define_rule(Token::synthetic("A"), 1).unwrap();
    let b = grammar.define_rule(Token::synthetic("B"), 2).unwrap();
    let mut indices = vec![];
    indices.push(grammar.define_action_in_alt(a, 1, ActionAst::action(quote!{ one(); })).unwrap());
    indices.push(grammar.define_action_in_alt(b, 2, ActionAst::action(quote!{ two(); })).unwrap());
    indices.push(grammar.define_action_in_alt(b, 1, ActionAst::action(quote!{ three(); })).unwrap());
    indices.push(grammar.define_action_in_alt(a, 1, ActionAst::action(quote!{ four(); })).unwrap());
    assert_eq!(indices, vec![Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(grammar.rule(a).action_index, Some(4));
    assert_eq!(grammar.rule(b).action_index, Some(3));
    assert_eq!(grammar.registry.num_actions(), 4);
    assert_eq!(grammar.registry.action(2).and_then(|a| a.index), Some(2));
    assert!(grammar.registry.action(0).is_none());
  }

  #[test]
  fn failed_registration_consumes_no_index() {
    let mut grammar = Grammar::new("L", GrammarKind::Lexer);
    let a = grammar.define_rule(Token::synthetic("A"), 1).unwrap();
    assert!(grammar.define_action_in_alt(a, 2, ActionAst::action(quote!{ x(); })).is_err());
    assert_eq!(grammar.define_action_in_alt(a, 1, ActionAst::action(quote!{ y(); })), Ok(Some(1)));
  }

  #[test]
  fn registration_in_unknown_rule() {
    let mut grammar = Grammar::new("L", GrammarKind::Lexer);
    let a = grammar.define_rule(Token::synthetic("A"), 1).unwrap();
    let err = StructuralError::RuleOutOfRange { rule: 5, num_rules: 1 };
    assert_eq!(grammar.define_action_in_alt(5, 1, ActionAst::action(quote!{ x(); })), Err(err.clone()));
    assert_eq!(grammar.define_predicate_in_alt(5, 1, ActionAst::predicate(quote!{ p })), Err(err));
    assert_eq!(grammar.registry.num_actions(), 0);
    assert_eq!(grammar.registry.num_predicates(), 0);
    assert_eq!(grammar.define_action_in_alt(a, 1, ActionAst::action(quote!{ y(); })), Ok(Some(1)));
  }

  #[test]
  fn predicates_are_numbered_across_rules() {
    let mut grammar = Grammar::new("P", GrammarKind::Parser);
    let a = grammar.define_rule(Token::synthetic("a"), 1).unwrap();
    let b = grammar.define_rule(Token::synthetic("b"), 1).unwrap();
    assert_eq!(grammar.define_predicate_in_alt(a, 1, ActionAst::predicate(quote!{ p })), Ok(1));
    assert_eq!(grammar.define_predicate_in_alt(b, 1, ActionAst::predicate(quote!{ q })), Ok(2));
    assert_eq!(grammar.define_action_in_alt(b, 1, ActionAst::action(quote!{ f(); })), Ok(None));
    assert_eq!(grammar.registry.num_predicates(), 2);
  }

  #[test]
  fn rule_lookup_keeps_first_declaration() {
    let mut grammar = Grammar::new("P", GrammarKind::Parser);
    assert_eq!(grammar.define_rule(Token::synthetic("a"), 1), Ok(0));
    assert_eq!(grammar.define_rule(Token::synthetic("b"), 1), Ok(1));
    assert_eq!(grammar.define_rule(Token::synthetic("a"), 3), Ok(2));
    assert_eq!(grammar.get_rule("a").map(|r| r.num_alts()), Some(1));
    assert_eq!(grammar.rule_index("b"), Some(1));
    assert!(grammar.get_rule("c").is_none());
    assert!(grammar.define_rule(Token::synthetic("d"), 0).is_err());
    assert_eq!(grammar.rules.len(), 3);
  }
}
