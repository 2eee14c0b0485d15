//! Sidebar navigation tree.
//!
//! Models the transient host-page state the scroller reads: a tree of
//! links and sections where some sections are independently scrollable.
//! At most one link is active at a time. Nodes are addressed by index
//! paths (indices into each level's child list, starting at the roots).

/// A navigation link, one per destination page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    /// Rows this link occupies (wrapped titles take more than one)
    pub height: u16,
    /// Marks the link for the page currently viewed
    pub active: bool,
}

impl NavLink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            height: 1,
            active: false,
        }
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }
}

/// Scroll position of a scrollable section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Rows scrolled past the top of the content
    pub offset: u16,
    /// Visible rows
    pub viewport_height: u16,
}

impl ScrollState {
    pub fn new(viewport_height: u16) -> Self {
        Self {
            offset: 0,
            viewport_height,
        }
    }

    /// Largest offset that still shows a full viewport of content
    pub fn max_scroll(&self, content_height: u16) -> u16 {
        content_height.saturating_sub(self.viewport_height)
    }
}

/// A grouping of links, optionally scrollable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    pub title: String,
    /// Rows the section header occupies
    pub header_height: u16,
    /// Present when this section is a scroll container
    pub scroll: Option<ScrollState>,
    pub children: Vec<NavNode>,
}

impl NavSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            header_height: 1,
            scroll: None,
            children: Vec::new(),
        }
    }

    pub fn scrollable(mut self, viewport_height: u16) -> Self {
        self.scroll = Some(ScrollState::new(viewport_height));
        self
    }

    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.children = children;
        self
    }

    /// Height of the scrollable content (children only, header excluded)
    pub fn content_height(&self) -> u16 {
        self.children.iter().map(NavNode::outer_height).sum()
    }

    /// Flatten this section's content for rendering
    pub fn rows(&self) -> Vec<FlatRow> {
        let mut out = Vec::new();
        flatten(&self.children, 0, &mut out);
        out
    }

    /// Rows this section occupies in its parent's content
    pub fn outer_height(&self) -> u16 {
        let body = match self.scroll {
            Some(state) => state.viewport_height,
            None => self.content_height(),
        };
        self.header_height + body
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    Link(NavLink),
    Section(NavSection),
}

impl NavNode {
    /// Rows this node occupies in its parent's content
    pub fn outer_height(&self) -> u16 {
        match self {
            NavNode::Link(link) => link.height,
            NavNode::Section(section) => section.outer_height(),
        }
    }

    fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Link(_) => &[],
            NavNode::Section(section) => &section.children,
        }
    }
}

/// One row of the flattened tree, for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub depth: usize,
    pub title: String,
    pub height: u16,
    pub is_link: bool,
    pub active: bool,
}

fn flatten(nodes: &[NavNode], depth: usize, out: &mut Vec<FlatRow>) {
    for node in nodes {
        match node {
            NavNode::Link(link) => out.push(FlatRow {
                depth,
                title: link.title.clone(),
                height: link.height,
                is_link: true,
                active: link.active,
            }),
            NavNode::Section(section) => {
                out.push(FlatRow {
                    depth,
                    title: section.title.clone(),
                    height: section.header_height,
                    is_link: false,
                    active: false,
                });
                flatten(&section.children, depth + 1, out);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    pub roots: Vec<NavNode>,
}

impl NavTree {
    pub fn new(roots: Vec<NavNode>) -> Self {
        Self { roots }
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&NavNode> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.roots.get(first)?;
        for &idx in rest {
            node = node.children().get(idx)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut NavNode> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(first)?;
        for &idx in rest {
            node = match node {
                NavNode::Section(section) => section.children.get_mut(idx)?,
                NavNode::Link(_) => return None,
            };
        }
        Some(node)
    }

    pub fn section_at(&self, path: &[usize]) -> Option<&NavSection> {
        match self.node_at(path)? {
            NavNode::Section(section) => Some(section),
            NavNode::Link(_) => None,
        }
    }

    pub fn section_at_mut(&mut self, path: &[usize]) -> Option<&mut NavSection> {
        match self.node_at_mut(path)? {
            NavNode::Section(section) => Some(section),
            NavNode::Link(_) => None,
        }
    }

    /// Path to the active link, if any
    pub fn active_path(&self) -> Option<Vec<usize>> {
        fn search(nodes: &[NavNode], path: &mut Vec<usize>) -> bool {
            for (idx, node) in nodes.iter().enumerate() {
                path.push(idx);
                match node {
                    NavNode::Link(link) if link.active => return true,
                    NavNode::Section(section) => {
                        if search(&section.children, path) {
                            return true;
                        }
                    }
                    NavNode::Link(_) => {}
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.roots, &mut path).then_some(path)
    }

    /// Nearest scrollable ancestor of the node at `path`: the longest
    /// proper prefix naming a section with scroll state
    pub fn container_path(&self, path: &[usize]) -> Option<Vec<usize>> {
        (1..path.len()).rev().find_map(|len| {
            let prefix = &path[..len];
            self.section_at(prefix)
                .filter(|s| s.scroll.is_some())
                .map(|_| prefix.to_vec())
        })
    }

    /// Offset of the node at `path` from the top of the scrollable
    /// content of the container at `container`. `container` must be a
    /// proper prefix of `path`; intermediate sections contribute their
    /// headers and preceding siblings their full outer heights.
    pub fn offset_within(&self, container: &[usize], path: &[usize]) -> Option<u16> {
        if path.len() <= container.len() || &path[..container.len()] != container {
            return None;
        }

        let mut nodes = &self.section_at(container)?.children;
        let mut offset: u16 = 0;
        let relative = &path[container.len()..];
        for (level, &idx) in relative.iter().enumerate() {
            offset += nodes
                .get(..idx)?
                .iter()
                .map(NavNode::outer_height)
                .sum::<u16>();
            if level + 1 == relative.len() {
                nodes.get(idx)?;
                return Some(offset);
            }
            match nodes.get(idx)? {
                NavNode::Section(section) => {
                    offset += section.header_height;
                    nodes = &section.children;
                }
                NavNode::Link(_) => return None,
            }
        }
        None
    }

    /// Paths of all links in document order
    pub fn link_paths(&self) -> Vec<Vec<usize>> {
        fn walk(nodes: &[NavNode], path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            for (idx, node) in nodes.iter().enumerate() {
                path.push(idx);
                match node {
                    NavNode::Link(_) => out.push(path.clone()),
                    NavNode::Section(section) => walk(&section.children, path, out),
                }
                path.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.roots, &mut Vec::new(), &mut out);
        out
    }

    /// Index of the active link within `link_paths()` order
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_path()?;
        self.link_paths().iter().position(|p| *p == active)
    }

    /// Mark the link at document-order `index` active, clearing any
    /// previous active link. Returns false when out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        let paths = self.link_paths();
        let Some(target) = paths.get(index) else {
            return false;
        };
        let target = target.clone();
        for path in paths {
            if let Some(NavNode::Link(link)) = self.node_at_mut(&path) {
                link.active = path == target;
            }
        }
        true
    }

    /// Flatten the whole tree for rendering
    pub fn rows(&self) -> Vec<FlatRow> {
        let mut out = Vec::new();
        flatten(&self.roots, 0, &mut out);
        out
    }

    /// Path of the first scroll container in document order
    pub fn first_container_path(&self) -> Option<Vec<usize>> {
        fn search(nodes: &[NavNode], path: &mut Vec<usize>) -> bool {
            for (idx, node) in nodes.iter().enumerate() {
                if let NavNode::Section(section) = node {
                    path.push(idx);
                    if section.scroll.is_some() || search(&section.children, path) {
                        return true;
                    }
                    path.pop();
                }
            }
            false
        }

        let mut path = Vec::new();
        search(&self.roots, &mut path).then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> NavTree {
        // root section is the scrollwrap; a nested plain section holds
        // the active link
        NavTree::new(vec![NavNode::Section(
            NavSection::new("Navigation").scrollable(10).with_children(vec![
                NavNode::Link(NavLink::new("Home")),
                NavNode::Section(NavSection::new("Guide").with_children(vec![
                    NavNode::Link(NavLink::new("Install")),
                    NavNode::Link(NavLink::new("Usage").activated()),
                ])),
                NavNode::Link(NavLink::new("Reference")),
            ]),
        )])
    }

    #[test]
    fn test_active_path() {
        let tree = sample_tree();
        assert_eq!(tree.active_path(), Some(vec![0, 1, 1]));
    }

    #[test]
    fn test_no_active_path() {
        let tree = NavTree::new(vec![NavNode::Link(NavLink::new("Home"))]);
        assert_eq!(tree.active_path(), None);
    }

    #[test]
    fn test_nearest_container_skips_plain_sections() {
        let tree = sample_tree();
        let active = tree.active_path().unwrap();
        assert_eq!(tree.container_path(&active), Some(vec![0]));
    }

    #[test]
    fn test_no_container_for_unwrapped_link() {
        let tree = NavTree::new(vec![NavNode::Section(
            NavSection::new("Plain")
                .with_children(vec![NavNode::Link(NavLink::new("Orphan").activated())]),
        )]);
        let active = tree.active_path().unwrap();
        assert_eq!(tree.container_path(&active), None);
    }

    #[test]
    fn test_innermost_container_wins() {
        let tree = NavTree::new(vec![NavNode::Section(
            NavSection::new("Outer").scrollable(20).with_children(vec![
                NavNode::Section(
                    NavSection::new("Inner")
                        .scrollable(5)
                        .with_children(vec![NavNode::Link(NavLink::new("Deep").activated())]),
                ),
            ]),
        )]);
        let active = tree.active_path().unwrap();
        assert_eq!(tree.container_path(&active), Some(vec![0, 0]));
    }

    #[test]
    fn test_offset_within() {
        let tree = sample_tree();
        // Home (1) + Guide header (1) + Install (1) = 3 rows above Usage
        assert_eq!(tree.offset_within(&[0], &[0, 1, 1]), Some(3));
        // Home (1) + Guide outer (header 1 + 2 links) = 4 rows above Reference
        assert_eq!(tree.offset_within(&[0], &[0, 2]), Some(4));
    }

    #[test]
    fn test_offset_within_rejects_non_prefix() {
        let tree = sample_tree();
        assert_eq!(tree.offset_within(&[0, 1], &[0, 2]), None);
    }

    #[test]
    fn test_content_and_outer_height() {
        let tree = sample_tree();
        let container = tree.section_at(&[0]).unwrap();
        // Home + Guide (1 + 2) + Reference
        assert_eq!(container.content_height(), 5);
        // scrollable: header + viewport, not content
        assert_eq!(container.outer_height(), 11);
    }

    #[test]
    fn test_set_active_moves_the_mark() {
        let mut tree = sample_tree();
        assert_eq!(tree.active_index(), Some(2));
        assert!(tree.set_active(0));
        assert_eq!(tree.active_path(), Some(vec![0, 0]));
        assert_eq!(tree.link_paths().len(), 4);
        assert!(!tree.set_active(99));
    }

    #[test]
    fn test_rows_flatten_in_document_order() {
        let tree = sample_tree();
        let rows = tree.rows();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Navigation", "Home", "Guide", "Install", "Usage", "Reference"]
        );
        assert!(rows[4].active);
        assert_eq!(rows[3].depth, 2);
    }

    #[test]
    fn test_first_container_path() {
        let tree = sample_tree();
        assert_eq!(tree.first_container_path(), Some(vec![0]));

        let no_container = NavTree::new(vec![NavNode::Link(NavLink::new("a"))]);
        assert_eq!(no_container.first_container_path(), None);
    }

    #[test]
    fn test_section_rows_exclude_own_header() {
        let tree = sample_tree();
        let container = tree.section_at(&[0]).unwrap();
        let rows = container.rows();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Guide", "Install", "Usage", "Reference"]);
    }

    #[test]
    fn test_max_scroll_clamp() {
        let state = ScrollState::new(10);
        assert_eq!(state.max_scroll(25), 15);
        assert_eq!(state.max_scroll(5), 0);
    }
}
