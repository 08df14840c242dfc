//! Expression tree shape tests using the fluent assertion API

#[cfg(test)]
mod tests {
    use chemtyper::chem::parser::{parse_markup, NodeKind};
    use chemtyper::chem::testing::assert_tree;

    #[test]
    fn water_scripts_the_hydrogen() {
        let tree = parse_markup("H_{2}O");
        assert_tree(&tree)
            .kind(NodeKind::Root)
            .child_count(2)
            .child(0, |h| {
                h.kind(NodeKind::Element)
                    .value("H")
                    .subscript(|sub| {
                        sub.kind(NodeKind::Group).text("2");
                    });
            })
            .child(1, |o| {
                o.kind(NodeKind::Element).value("O").no_scripts();
            });
    }

    #[test]
    fn isotope_takes_both_scripts() {
        let tree = parse_markup("^{14}_{6}C");
        assert_tree(&tree).child_count(1).child(0, |c| {
            c.kind(NodeKind::Isotope)
                .value("C")
                .subscript(|sub| {
                    sub.text("6");
                })
                .superscript(|sup| {
                    sup.text("14");
                });
        });
    }

    #[test]
    fn braced_element_is_unwrapped_for_scripts() {
        let tree = parse_markup("{Ca}_{2}");
        assert_tree(&tree).child_count(1).child(0, |ca| {
            ca.kind(NodeKind::Element).value("Ca").subscript(|sub| {
                sub.text("2");
            });
        });
    }

    #[test]
    fn multi_child_group_keeps_its_scripts_off() {
        let tree = parse_markup("{AB}_{2}");
        assert_tree(&tree)
            .child_count(2)
            .child(0, |group| {
                group.kind(NodeKind::Group).child_count(2).no_scripts();
            })
            .child(1, |degraded| {
                degraded.kind(NodeKind::Char).value("").subscript(|sub| {
                    sub.text("2");
                });
            });
    }

    #[test]
    fn commands_keep_raw_arguments() {
        let tree = parse_markup(r"\xrightarrow[heat]{\Delta}");
        assert_tree(&tree).child_count(1).child(0, |arrow| {
            arrow
                .kind(NodeKind::Command)
                .value("xrightarrow")
                .args(&[r"\Delta"]);
        });
    }

    #[test]
    fn charge_on_polyatomic_tail() {
        let tree = parse_markup("SO_{4}^{2-}");
        assert_tree(&tree)
            .child_count(2)
            .child(0, |s| {
                s.value("S").no_scripts();
            })
            .child(1, |o| {
                o.value("O")
                    .subscript(|sub| {
                        sub.text("4");
                    })
                    .superscript(|sup| {
                        sup.text("2-");
                    });
            });
    }

    #[test]
    fn states_are_plain_characters() {
        let tree = parse_markup("Na(aq)");
        assert_tree(&tree)
            .child_count(5)
            .child(1, |open| {
                open.kind(NodeKind::ParenLeft);
            })
            .child(2, |a| {
                a.kind(NodeKind::Char).value("a");
            })
            .child(4, |close| {
                close.kind(NodeKind::ParenRight);
            });
    }
}
