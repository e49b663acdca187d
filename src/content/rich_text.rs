//! Rich text documents as the content repository sends them.
//!
//! Every node carries a `nodeType` and we only know about a fixed set
//! of them. Unknown node types are kept as [`Node::Unknown`] so that a
//! new block type in the editor doesn't make whole posts unreadable.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
  #[serde(rename = "type")]
  pub mark_type: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "kebab-case")]
pub enum Node {
  Document { #[serde(default)] content: Vec<Node> },
  Paragraph { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-1")]
  Heading1 { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-2")]
  Heading2 { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-3")]
  Heading3 { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-4")]
  Heading4 { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-5")]
  Heading5 { #[serde(default)] content: Vec<Node> },
  #[serde(rename = "heading-6")]
  Heading6 { #[serde(default)] content: Vec<Node> },
  Blockquote { #[serde(default)] content: Vec<Node> },
  Hr {},
  UnorderedList { #[serde(default)] content: Vec<Node> },
  OrderedList { #[serde(default)] content: Vec<Node> },
  ListItem { #[serde(default)] content: Vec<Node> },
  Table { #[serde(default)] content: Vec<Node> },
  TableRow { #[serde(default)] content: Vec<Node> },
  TableCell { #[serde(default)] content: Vec<Node> },
  TableHeaderCell { #[serde(default)] content: Vec<Node> },
  EmbeddedEntryBlock { #[serde(default)] data: Value },
  EmbeddedAssetBlock { #[serde(default)] data: Value },
  Hyperlink {
    #[serde(default)] data: Value,
    #[serde(default)] content: Vec<Node>
  },
  EntryHyperlink {
    #[serde(default)] data: Value,
    #[serde(default)] content: Vec<Node>
  },
  AssetHyperlink {
    #[serde(default)] data: Value,
    #[serde(default)] content: Vec<Node>
  },
  EmbeddedEntryInline { #[serde(default)] data: Value },
  Text {
    value: String,
    #[serde(default)] marks: Vec<Mark>
  },
  #[serde(other)]
  Unknown
}

impl Default for Node {
  fn default() -> Self {
    Node::Document { content: Vec::new() }
  }
}

impl Node {

  pub fn children(&self) -> &[Node] {
    match self {
      Node::Document { content }
      | Node::Paragraph { content }
      | Node::Heading1 { content }
      | Node::Heading2 { content }
      | Node::Heading3 { content }
      | Node::Heading4 { content }
      | Node::Heading5 { content }
      | Node::Heading6 { content }
      | Node::Blockquote { content }
      | Node::UnorderedList { content }
      | Node::OrderedList { content }
      | Node::ListItem { content }
      | Node::Table { content }
      | Node::TableRow { content }
      | Node::TableCell { content }
      | Node::TableHeaderCell { content }
      | Node::Hyperlink { content, .. }
      | Node::EntryHyperlink { content, .. }
      | Node::AssetHyperlink { content, .. } => content,
      _ => &[]
    }
  }

  pub fn is_block(&self) -> bool {
    !matches!(
      self,
      Node::Text { .. }
      | Node::Hyperlink { .. }
      | Node::EntryHyperlink { .. }
      | Node::AssetHyperlink { .. }
      | Node::EmbeddedEntryInline { .. }
      | Node::Unknown
    )
  }

  /**
   * Flattens the tree to its text. Siblings are glued together as
   * they are, except that a space goes in front of every block node
   * that follows something, so that two paragraphs don't end up
   * welded into one word.
   */
  pub fn to_plain_text(&self) -> String {
    if let Node::Text { value, .. } = self {
      return value.clone();
    }
    let children = self.children();
    let mut text = String::new();
    for (i, node) in children.iter().enumerate() {
      let node_text = node.to_plain_text();
      // Empty text runs still count, empty blocks and inlines don't.
      if node_text.is_empty() && !matches!(node, Node::Text { .. }) {
        continue;
      }
      text.push_str(&node_text);
      if children.get(i + 1).map_or(false, Node::is_block) {
        text.push(' ');
      }
    }
    text
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(value: &str) -> Node {
    Node::Text { value: value.to_string(), marks: Vec::new() }
  }

  #[test]
  fn deserializes_contentful_document() {
    let json = r#"{
      "nodeType": "document",
      "data": {},
      "content": [
        {
          "nodeType": "heading-2",
          "data": {},
          "content": [{ "nodeType": "text", "value": "Title", "marks": [], "data": {} }]
        },
        {
          "nodeType": "paragraph",
          "data": {},
          "content": [
            { "nodeType": "text", "value": "Hello ", "marks": [{ "type": "bold" }], "data": {} },
            {
              "nodeType": "hyperlink",
              "data": { "uri": "https://example.com" },
              "content": [{ "nodeType": "text", "value": "world", "marks": [], "data": {} }]
            }
          ]
        }
      ]
    }"#;
    let document: Node = serde_json::from_str(json).unwrap();
    assert_eq!(2, document.children().len());
    assert_eq!("Title Hello world", document.to_plain_text());
  }

  #[test]
  fn unknown_node_types_do_not_break_parsing() {
    let json = r#"{
      "nodeType": "document",
      "content": [
        { "nodeType": "some-future-block", "content": [] },
        { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "still here" }] }
      ]
    }"#;
    let document: Node = serde_json::from_str(json).unwrap();
    assert_eq!(Node::Unknown, document.children()[0]);
    assert_eq!("still here", document.to_plain_text());
  }

  #[test]
  fn block_divisor_only_before_blocks() {
    let document = Node::Document {
      content: vec![
        Node::Paragraph { content: vec![text("one"), text("two")] },
        Node::Paragraph { content: vec![text("three")] },
        Node::Hr {},
        Node::UnorderedList {
          content: vec![
            Node::ListItem { content: vec![Node::Paragraph { content: vec![text("a")] }] },
            Node::ListItem { content: vec![Node::Paragraph { content: vec![text("b")] }] }
          ]
        }
      ]
    };
    // The hr has no text of its own but still counts as the block
    // following "three".
    assert_eq!("onetwo three a b", document.to_plain_text());
  }

  #[test]
  fn empty_text_run_before_a_block_still_gets_a_space() {
    let item = Node::ListItem {
      content: vec![
        text(""),
        Node::Paragraph { content: vec![text("x")] }
      ]
    };
    assert_eq!(" x", item.to_plain_text());
    let empty_block_first = Node::ListItem {
      content: vec![
        Node::Paragraph { content: Vec::new() },
        Node::Paragraph { content: vec![text("x")] }
      ]
    };
    assert_eq!("x", empty_block_first.to_plain_text());
  }

  #[test]
  fn empty_document_is_empty_text() {
    assert_eq!("", Node::default().to_plain_text());
  }
}
