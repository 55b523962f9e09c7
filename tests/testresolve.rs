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

//! End-to-end scenarios: a grammar model is built the way the grammar walker does it, then checked and queried.

use oak_resolve::*;
use partial::Partial;
use quote::quote;
use syn::parse_quote;

fn token(text: &str) -> Token {
  Token::synthetic(text)
}

fn typed_args(dict_type: DictType, decls: &str) -> Option<AttributeDict> {
  Some(AttributeDict::parse_typed_args(dict_type, decls, Span::call_site()))
}

fn expect_value(grammar: Partial<Grammar>) -> Grammar {
  match grammar {
    Partial::Value(grammar) => grammar,
    Partial::Fake(_) => panic!("the grammar has errors"),
    Partial::Nothing => panic!("the analysis stopped")
  }
}

/// stat : expr ';' { print($expr.v); } ;
/// expr returns [int v] : INT { $v = $INT.text; } ;
fn expr_grammar() -> Grammar {
  let mut grammar = Grammar::new("Expr", GrammarKind::Combined);
  let stat = grammar.define_rule(token("stat"), 1).unwrap();
  let expr = grammar.define_rule(token("expr"), 1).unwrap();
  grammar.rule_mut(stat).define_rule_ref_in_alt(1, token("expr")).unwrap();
  grammar.rule_mut(stat).define_token_ref_in_alt(1, token("';'")).unwrap();
  grammar.define_action_in_alt(stat, 1, ActionAst::action(quote!{ print($expr.v); })).unwrap();
  grammar.rule_mut(expr).retvals = typed_args(DictType::Retval, "int v");
  grammar.rule_mut(expr).define_token_ref_in_alt(1, token("INT")).unwrap();
  grammar.define_action_in_alt(expr, 1, ActionAst::action(quote!{ $v = $INT.text; })).unwrap();
  grammar
}

#[test]
fn unlabeled_rule_reference_resolves_to_return_value() {
  let grammar = expr_grammar();
  let stat = grammar.rule_index("stat").unwrap();
  let expr = grammar.rule_index("expr").unwrap();
  let stat_action = &grammar.rule(stat).alt(1).unwrap().actions[0];
  let expr_action = &grammar.rule(expr).alt(1).unwrap().actions[0];

  let expected = grammar.rule(expr).retvals.as_ref().and_then(|retvals| retvals.get("v"));
  assert!(expected.is_some());
  assert_eq!(grammar.resolver(stat).resolve_qualified_attribute("expr", "v", stat_action), expected);
  assert_eq!(grammar.resolver(expr).resolve_to_attribute("v", expr_action), expected);
  assert!(grammar.resolver(stat).resolve_qualified_attribute("expr", "w", stat_action).is_none());
}

#[test]
fn expr_grammar_checks_cleanly() {
  let diagnostics = Diagnostics::new();
  let grammar = expect_value(check(expr_grammar(), &[], &diagnostics));
  assert!(diagnostics.into_vec().is_empty());
  assert!(grammar.get_rule("stat").unwrap().is_start_rule);
  assert!(!grammar.get_rule("expr").unwrap().is_start_rule);
  // Parser actions are not numbered.
  assert_eq!(grammar.registry.num_actions(), 0);
}

#[test]
fn rule_label_to_another_rule() {
  // a : b=callee ;
  // callee returns [int v] : ID ;
  let mut grammar = Grammar::new("G", GrammarKind::Parser);
  let a = grammar.define_rule(token("a"), 1).unwrap();
  let callee = grammar.define_rule(token("callee"), 1).unwrap();
  grammar.rule_mut(a).define_label_in_alt(1, token("b"), token("callee"), LabelType::RuleLabel).unwrap();
  grammar.rule_mut(a).define_rule_ref_in_alt(1, token("callee")).unwrap();
  grammar.rule_mut(callee).retvals = typed_args(DictType::Retval, "int v");
  grammar.rule_mut(callee).define_token_ref_in_alt(1, token("ID")).unwrap();

  let node = ActionAst::action(quote!{ f($b.v); });
  let resolver = grammar.resolver(a);
  assert_eq!(resolver.resolve_qualified_attribute("b", "v", &node).map(|v| v.name.as_str()), Some("v"));
  assert!(resolver.resolve_qualified_attribute("b", "nonexistent", &node).is_none());
  assert_eq!(resolver.resolve_to_rule("b").map(|r| r.name.as_str()), Some("callee"));
  assert!(!resolver.resolves_to_list_label("b", &node));
}

/// lexer grammar L;
/// ID : LETTER+ { $type = Ident; } ;
/// WS : ' '+ -> skip ;
/// fragment LETTER : 'a'..'z' { check($text); } ;
#[test]
fn lexer_grammar() {
  let mut grammar = Grammar::new("L", GrammarKind::Lexer);
  let id = grammar.define_rule(token("ID"), 1).unwrap();
  let ws = grammar.define_rule(token("WS"), 1).unwrap();
  let letter = grammar.define_rule(token("LETTER"), 1).unwrap();
  grammar.rule_mut(letter).modifiers = vec![token("fragment")];
  grammar.rule_mut(id).define_rule_ref_in_alt(1, token("LETTER")).unwrap();

  let indices = vec![
    grammar.define_action_in_alt(id, 1,
      ActionAst::parse(ActionKind::Action, "{ $type = Ident; }", Span::call_site()).unwrap()),
    grammar.define_action_in_alt(ws, 1, ActionAst::forced(quote!{ skip })),
    grammar.define_action_in_alt(letter, 1, ActionAst::action(quote!{ check($text); }))];
  assert_eq!(indices, vec![Ok(Some(1)), Ok(Some(2)), Ok(Some(3))]);

  let diagnostics = Diagnostics::new();
  let grammar = expect_value(check(grammar, &[], &diagnostics));
  assert!(!diagnostics.has_errors());
  assert!(grammar.get_rule("LETTER").unwrap().is_fragment());
  assert!(!grammar.get_rule("ID").unwrap().is_fragment());
  assert!(!grammar.get_rule("LETTER").unwrap().is_start_rule);
  assert_eq!(grammar.registry.num_actions(), 3);
}

#[test]
fn errors_are_collected_in_one_run() {
  // r : x=ID x=e { $x.text; $bogus; $e2.v; } | undefined ;
  // e : ID ;
  // e : INT ;
  let mut grammar = Grammar::new("G", GrammarKind::Parser);
  let r = grammar.define_rule(token("r"), 2).unwrap();
  grammar.define_rule(token("e"), 1).unwrap();
  grammar.define_rule(token("e"), 1).unwrap();
  {
    let rule = grammar.rule_mut(r);
    rule.define_label_in_alt(1, token("x"), token("ID"), LabelType::TokenLabel).unwrap();
    rule.define_token_ref_in_alt(1, token("ID")).unwrap();
    rule.define_label_in_alt(1, token("x"), token("e"), LabelType::RuleLabel).unwrap();
    rule.define_rule_ref_in_alt(1, token("e")).unwrap();
    rule.define_rule_ref_in_alt(2, token("undefined")).unwrap();
  }
  grammar.define_action_in_alt(r, 1, ActionAst::action(quote!{ $x.text; $bogus; $e2.v; })).unwrap();

  let diagnostics = Diagnostics::new();
  match check(grammar, &[parse_quote!(#[show_rules])], &diagnostics) {
    Partial::Fake(grammar) => assert_eq!(grammar.attributes.print_rules, PrintLevel::Show),
    _ => panic!("the errors must give a `Fake` grammar")
  }
  assert_eq!(diagnostics.errors(), vec![
    SemanticError::Duplicate { what: String::from("rule"), name: String::from("e") },
    SemanticError::UnknownRuleReference(String::from("undefined")),
    SemanticError::LabelTypeConflict {
      label: String::from("x"),
      previous: LabelType::TokenLabel,
      current: LabelType::RuleLabel
    },
    SemanticError::UnknownSimpleAttribute(String::from("bogus")),
    SemanticError::UnknownSimpleAttribute(String::from("e2"))]);
  diagnostics.emit("G");
}

#[test]
fn empty_grammar_stops_the_analysis() {
  let diagnostics = Diagnostics::new();
  match check(Grammar::new("G", GrammarKind::Parser), &[], &diagnostics) {
    Partial::Nothing => (),
    _ => panic!("a grammar without rule cannot be analysed")
  }
  assert_eq!(diagnostics.errors(), vec![SemanticError::NoRule]);
}

#[test]
fn tree_grammar_rule_scope() {
  let mut grammar = Grammar::new("T", GrammarKind::Tree);
  let walk = grammar.define_rule(token("walk"), 1).unwrap();
  grammar.define_action_in_alt(walk, 1, ActionAst::action(quote!{ f($start); g($stop); })).unwrap();
  let diagnostics = Diagnostics::new();
  let _ = check(grammar, &[], &diagnostics);
  assert_eq!(diagnostics.errors(), vec![SemanticError::UnknownSimpleAttribute(String::from("stop"))]);
}
