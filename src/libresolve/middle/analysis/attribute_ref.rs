// Copyright 2014 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Checks every attribute reference found in the actions of a rule against the `AttributeResolver` of this rule.

use crate::ast::*;
use crate::rule::Rule;
use crate::grammar::Grammar;
use crate::resolver::*;
use crate::diagnostic::*;
use crate::front::action::*;
use partial::Partial::*;

pub struct AttributeRefs<'a>
{
  resolver: RuleResolver<'a>,
  diagnostics: &'a Diagnostics,
  has_unresolved: bool
}

impl<'a> AttributeRefs<'a>
{
  pub fn analyse(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
    let mut has_unresolved = false;
    for rule in &grammar.rules {
      has_unresolved |= AttributeRefs::check_rule(&grammar, rule, diagnostics);
    }
    if has_unresolved {
      Fake(grammar)
    } else {
      Value(grammar)
    }
  }

  fn check_rule(grammar: &Grammar, rule: &Rule, diagnostics: &Diagnostics) -> bool {
    let mut analyser = AttributeRefs {
      resolver: RuleResolver::new(grammar, rule),
      diagnostics: diagnostics,
      has_unresolved: false
    };
    for action in rule.all_actions() {
      analyser.visit_action(action);
    }
    analyser.has_unresolved
  }

  fn visit_action(&mut self, action: &ActionAst) {
    for attr_ref in attribute_refs(&action.code) {
      match attr_ref {
        AttrRef::Simple(x) => self.attr(&x.text, action),
        AttrRef::Qualified(x, y) => self.qualified_attr(&x.text, &y.text, action),
        AttrRef::Dynamic(x, y) => self.dynamic_scope_attr(&x.text, &y.text, action)
      }
    }
  }

  /// `$x`
  fn attr(&mut self, x: &str, node: &ActionAst) {
    let resolver = self.resolver;
    if resolver.resolve_to_attribute(x, node).is_some()
      || resolver.resolves_to_token(x, node)
      || resolver.resolves_to_list_label(x, node)
      || self.rule().references_token(x)
    {
      return;
    }
    if self.isolated_rule_ref(x).is_some() {
      self.error(node, SemanticError::IsolatedRuleRef(String::from(x)));
    }
    else {
      self.error(node, SemanticError::UnknownSimpleAttribute(String::from(x)));
    }
  }

  /// `$x.y`
  fn qualified_attr(&mut self, x: &str, y: &str, node: &ActionAst) {
    let resolver = self.resolver;
    // `$x` is an attribute and `.y` a member access in the target language.
    if resolver.resolve_to_attribute(x, node).is_some()
      || resolver.resolve_qualified_attribute(x, y, node).is_some()
    {
      return;
    }
    let (rule, attr) = (String::from(x), String::from(y));
    if let Some(target) = self.isolated_rule_ref(x) {
      if target.args.as_ref().map_or(false, |args| args.contains(y)) {
        self.error(node, SemanticError::InvalidRuleParameterRef { rule, attr });
      }
      else {
        self.error(node, SemanticError::UnknownRuleAttribute { rule, attr });
      }
    }
    else if resolver.resolves_to_attribute_dict(x, node)
      || resolver.resolves_to_list_label(x, node)
      || self.rule().references_token(x)
    {
      self.error(node, SemanticError::UnknownAttributeInScope { scope: rule, attr });
    }
    else {
      self.error(node, SemanticError::UnknownSimpleAttribute(rule));
    }
  }

  /// `$x::y`
  fn dynamic_scope_attr(&mut self, x: &str, y: &str, node: &ActionAst) {
    let resolver = self.resolver;
    match resolver.resolve_to_dynamic_scope(x, node) {
      None => {
        self.error(node, SemanticError::UnknownDynamicScope(String::from(x)));
      }
      Some(scope) if !scope.contains(y) => {
        self.error(node, SemanticError::UnknownDynamicScopeAttribute {
          scope: String::from(x),
          attr: String::from(y)
        });
      }
      Some(_) => ()
    }
  }

  fn rule(&self) -> &'a Rule {
    self.resolver.rule()
  }

  /// The rule denoted by `x` if `x` is the current rule, a rule label or an unlabeled rule reference.
  fn isolated_rule_ref(&self, x: &str) -> Option<&'a Rule> {
    let rule = self.rule();
    let grammar = self.resolver.grammar();
    if x == rule.name {
      return Some(rule);
    }
    match rule.get_any_label_def(x) {
      Some(label) if label.kind == RuleLabel => grammar.get_rule(&label.element.text),
      Some(_) => None,
      None if rule.references_rule(x) => grammar.get_rule(x),
      None => None
    }
  }

  fn error(&mut self, node: &ActionAst, error: SemanticError) {
    self.diagnostics.span_err(node.span, error);
    self.has_unresolved = true;
  }
}

#[cfg(test)]
mod test
{
  use super::*;
  use crate::attribute::*;

  /// prog : s=stat ids+=ID (x=INT)? { <action> } | expr ;
  /// stat[int depth] returns [int v] : ID ;
  /// expr : INT ;
  fn grammar(action: &str) -> Grammar {
    let mut grammar = Grammar::new("G", GrammarKind::Parser);
    let prog = grammar.define_rule(Token::synthetic("prog"), 2).unwrap();
    let stat = grammar.define_rule(Token::synthetic("stat"), 1).unwrap();
    let expr = grammar.define_rule(Token::synthetic("expr"), 1).unwrap();
    {
      let rule = grammar.rule_mut(stat);
      rule.args = Some(AttributeDict::parse_typed_args(DictType::Arg, "int depth", Span::call_site()));
      rule.retvals = Some(AttributeDict::parse_typed_args(DictType::Retval, "int v", Span::call_site()));
      rule.define_token_ref_in_alt(1, Token::synthetic("ID")).unwrap();
    }
    grammar.rule_mut(expr).define_token_ref_in_alt(1, Token::synthetic("INT")).unwrap();
    {
      let rule = grammar.rule_mut(prog);
      rule.define_label_in_alt(1, Token::synthetic("s"), Token::synthetic("stat"), RuleLabel).unwrap();
      rule.define_rule_ref_in_alt(1, Token::synthetic("stat")).unwrap();
      rule.define_label_in_alt(1, Token::synthetic("ids"), Token::synthetic("ID"), TokenListLabel).unwrap();
      rule.define_token_ref_in_alt(1, Token::synthetic("ID")).unwrap();
      rule.define_label_in_alt(1, Token::synthetic("x"), Token::synthetic("INT"), TokenLabel).unwrap();
      rule.define_token_ref_in_alt(1, Token::synthetic("INT")).unwrap();
      rule.define_rule_ref_in_alt(2, Token::synthetic("expr")).unwrap();
    }
    let action = ActionAst::parse(ActionKind::Action, action, Span::call_site()).unwrap();
    grammar.define_action_in_alt(prog, 1, action).unwrap();
    let mut scope = AttributeDict::named_scope("Symbols");
    scope.add(Attribute::typed("Set<String>", "names"));
    grammar.define_scope("Symbols", scope);
    grammar
  }

  fn check(action: &str) -> Vec<SemanticError> {
    let diagnostics = Diagnostics::new();
    let _ = AttributeRefs::analyse(grammar(action), &diagnostics);
    diagnostics.errors()
  }

  #[test]
  fn resolved_references() {
    let errors = check("{ f($s.v, $s.text, $ids, $x, $x.line, $ID.text, $INT, $expr.text, $start, $prog.stop, $text.length(), $Symbols::names); }");
    assert_eq!(errors, vec![]);
  }

  #[test]
  fn unknown_simple_attribute() {
    assert_eq!(check("{ $nope = 1; }"), vec![SemanticError::UnknownSimpleAttribute(String::from("nope"))]);
    assert_eq!(check("{ $nope.text; }"), vec![SemanticError::UnknownSimpleAttribute(String::from("nope"))]);
  }

  #[test]
  fn isolated_rule_references() {
    assert_eq!(check("{ f($s); f($expr); }"), vec![
      SemanticError::IsolatedRuleRef(String::from("s")),
      SemanticError::IsolatedRuleRef(String::from("expr"))]);
  }

  #[test]
  fn unknown_rule_attributes() {
    assert_eq!(check("{ $s.nonexistent; $s.depth; }"), vec![
      SemanticError::UnknownRuleAttribute { rule: String::from("s"), attr: String::from("nonexistent") },
      SemanticError::InvalidRuleParameterRef { rule: String::from("s"), attr: String::from("depth") }]);
    assert_eq!(check("{ $prog.nope; }"), vec![
      SemanticError::UnknownRuleAttribute { rule: String::from("prog"), attr: String::from("nope") }]);
  }

  #[test]
  fn unknown_attribute_in_scope() {
    assert_eq!(check("{ $x.stop; $ids.text; }"), vec![
      SemanticError::UnknownAttributeInScope { scope: String::from("x"), attr: String::from("stop") },
      SemanticError::UnknownAttributeInScope { scope: String::from("ids"), attr: String::from("text") }]);
  }

  #[test]
  fn dynamic_scopes() {
    assert_eq!(check("{ $Nope::a; $Symbols::nope; }"), vec![
      SemanticError::UnknownDynamicScope(String::from("Nope")),
      SemanticError::UnknownDynamicScopeAttribute { scope: String::from("Symbols"), attr: String::from("nope") }]);
  }
}
