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

//! Predefined properties available through a label or a rule reference without being declared.
//!
//! The same label kind gives access to different properties depending on the kind of grammar: a tree grammar rule has no `stop` and a lexer rule exposes its `type` and `channel`. The table is thus keyed by the pair `(GrammarKind, LabelType)`.

use crate::ast::*;
use crate::attribute::*;
use std::collections::HashMap;

const RULE_PROPERTIES: [&str; 5] = ["text", "start", "stop", "tree", "st"];
const TREE_RULE_PROPERTIES: [&str; 4] = ["text", "start", "tree", "st"];
const LEXER_RULE_PROPERTIES: [&str; 9] =
  ["text", "type", "line", "index", "pos", "channel", "start", "stop", "int"];
const TOKEN_PROPERTIES: [&str; 8] =
  ["text", "type", "line", "index", "pos", "channel", "tree", "int"];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ScopeKey
{
  pub grammar: GrammarKind,
  pub label: LabelType
}

impl ScopeKey
{
  pub fn new(grammar: GrammarKind, label: LabelType) -> ScopeKey {
    ScopeKey { grammar, label }
  }
}

/// Fixed table of the predefined scopes of one grammar, built from its kind and never modified afterwards.
///
/// `RuleLabel` has an entry for every grammar kind, hence `rule_scope` cannot fail. List labels have no predefined scope.
#[derive(Clone, Debug)]
pub struct PredefinedScopes
{
  kind: GrammarKind,
  rule_scope: AttributeDict,
  scopes: HashMap<ScopeKey, AttributeDict>
}

impl PredefinedScopes
{
  pub fn new(kind: GrammarKind) -> PredefinedScopes {
    use crate::ast::GrammarKind::*;
    let token_dict = AttributeDict::with_names(DictType::Token, &TOKEN_PROPERTIES);
    let rule_scope = match kind {
      Parser | Combined => AttributeDict::with_names(DictType::PredefinedRule, &RULE_PROPERTIES),
      Tree => AttributeDict::with_names(DictType::PredefinedTreeRule, &TREE_RULE_PROPERTIES),
      Lexer => AttributeDict::with_names(DictType::PredefinedLexerRule, &LEXER_RULE_PROPERTIES)
    };
    let mut scopes = HashMap::new();
    scopes.insert(ScopeKey::new(kind, TokenLabel), token_dict);
    match kind {
      Tree => {
        scopes.insert(ScopeKey::new(kind, WildcardTreeLabel), rule_scope.clone());
      }
      Lexer => {
        scopes.insert(ScopeKey::new(kind, LexerStringLabel), rule_scope.clone());
      }
      Parser | Combined => ()
    }
    scopes.insert(ScopeKey::new(kind, RuleLabel), rule_scope.clone());
    PredefinedScopes {
      kind: kind,
      rule_scope: rule_scope,
      scopes: scopes
    }
  }

  pub fn kind(&self) -> GrammarKind {
    self.kind
  }

  /// Properties of a rule referenced from an action, e.g. `$r.text` or `$text`.
  pub fn rule_scope(&self) -> &AttributeDict {
    &self.rule_scope
  }

  pub fn get(&self, label: LabelType) -> Option<&AttributeDict> {
    self.get_by_key(ScopeKey::new(self.kind, label))
  }

  /// `None` if `key` belongs to another kind of grammar.
  pub fn get_by_key(&self, key: ScopeKey) -> Option<&AttributeDict> {
    self.scopes.get(&key)
  }
}
