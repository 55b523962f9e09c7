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
use std::collections::HashMap;

/// One alternative of a rule, it records what the actions of this alternative can reference.
#[derive(Clone, Debug)]
pub struct Alternative
{
  /// Index of the owning rule in the grammar.
  pub rule: usize,
  /// 1-based number of this alternative in its rule.
  pub alt_num: usize,
  /// Actions and predicates in order of appearance.
  pub actions: Vec<ActionAst>,
  /// A label can be defined several times, e.g. `ids+=ID (',' ids+=ID)*`.
  pub label_defs: HashMap<String, Vec<LabelElementPair>>,
  pub token_refs: HashMap<String, Vec<Token>>,
  pub rule_refs: HashMap<String, Vec<Token>>
}

impl Alternative
{
  pub fn new(rule: usize, alt_num: usize) -> Alternative {
    Alternative {
      rule: rule,
      alt_num: alt_num,
      actions: vec![],
      label_defs: HashMap::new(),
      token_refs: HashMap::new(),
      rule_refs: HashMap::new()
    }
  }

  pub fn define_label(&mut self, pair: LabelElementPair) {
    self.label_defs.entry(pair.label.text.clone())
      .or_insert_with(Vec::new)
      .push(pair);
  }

  pub fn define_token_ref(&mut self, token: Token) {
    self.token_refs.entry(token.text.clone())
      .or_insert_with(Vec::new)
      .push(token);
  }

  pub fn define_rule_ref(&mut self, rule: Token) {
    self.rule_refs.entry(rule.text.clone())
      .or_insert_with(Vec::new)
      .push(rule);
  }
}
