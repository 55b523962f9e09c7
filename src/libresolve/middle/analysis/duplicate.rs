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

use crate::ast::*;
use crate::attribute::AttributeDict;
use crate::grammar::Grammar;
use crate::diagnostic::*;
use partial::Partial::*;
use std::collections::HashMap;

pub fn rule_duplicate(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
  let has_duplicate = DuplicateItem::analyse(diagnostics, grammar.rules.iter(), "rule");
  make(grammar, has_duplicate)
}

/// Duplicates in the arguments, return values and scopes of the rules, and in the global scopes.
pub fn attribute_duplicate(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
  let mut has_duplicate = false;
  for rule in &grammar.rules {
    has_duplicate |= dict_duplicate(diagnostics, &rule.args, "argument");
    has_duplicate |= dict_duplicate(diagnostics, &rule.retvals, "return value");
    has_duplicate |= dict_duplicate(diagnostics, &rule.scope, "scope attribute");
  }
  let mut scopes: Vec<&AttributeDict> = grammar.scopes.values().collect();
  scopes.sort_by(|a, b| a.name.cmp(&b.name));
  for scope in scopes {
    has_duplicate |= DuplicateItem::analyse(diagnostics, scope.iter(), "scope attribute");
  }
  make(grammar, has_duplicate)
}

fn dict_duplicate(diagnostics: &Diagnostics, dict: &Option<AttributeDict>, what: &str) -> bool {
  dict.as_ref()
    .map_or(false, |dict| DuplicateItem::analyse(diagnostics, dict.iter(), what))
}

fn make(grammar: Grammar, has_duplicate: bool) -> Partial<Grammar> {
  if has_duplicate {
    Fake(grammar)
  } else {
    Value(grammar)
  }
}

struct DuplicateItem<'a, Item>
{
  diagnostics: &'a Diagnostics,
  items: HashMap<String, Item>,
  has_duplicate: bool,
  what_is_duplicated: String
}

impl<'a, Item> DuplicateItem<'a, Item> where
 Item: ItemName + ItemSpan
{
  pub fn analyse<ItemIter>(diagnostics: &'a Diagnostics, iter: ItemIter, item_kind: &str) -> bool where
   ItemIter: Iterator<Item=Item>
  {
    let (min_size, _) = iter.size_hint();
    DuplicateItem {
      diagnostics: diagnostics,
      items: HashMap::with_capacity(min_size),
      has_duplicate: false,
      what_is_duplicated: String::from(item_kind)
    }.populate(iter)
     .has_duplicate
  }

  fn populate<ItemIter: Iterator<Item=Item>>(mut self, iter: ItemIter) -> DuplicateItem<'a, Item> {
    for item in iter {
      let name = String::from(item.name());
      match self.items.get(&name) {
        Some(pre) => {
          self.duplicate_items(pre, item);
          self.has_duplicate = true;
        }
        None => {
          self.items.insert(name, item);
        }
      }
    }
    self
  }

  fn duplicate_items(&self, pre: &Item, current: Item) {
    self.diagnostics.multi_locations_err(vec![
      (current.span(), SemanticError::Duplicate {
        what: self.what_is_duplicated.clone(),
        name: String::from(current.name())
      }),
      (pre.span(), SemanticError::PreviousDefinition(String::from(pre.name())))]
    );
  }
}
