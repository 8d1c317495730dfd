#[cfg(test)]
mod tests {
    use crate::config::DocgenConfig;
    use crate::error::DocgenError;
    use crate::model::PropDescriptor;
    use crate::resolve::InheritanceResolver;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn config(roots: &[&Path]) -> DocgenConfig {
        let mut config = DocgenConfig::default();
        config.resolver.source_roots = roots.iter().map(|r| r.to_path_buf()).collect();
        config
    }

    fn hierarchy() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "base/index.ts",
            "export interface BaseComponentProps { id: string; testId?: string }",
        );
        write(
            dir.path(),
            "pressable/index.ts",
            "export interface PressableProps extends BaseComponentProps { pressed?: boolean }",
        );
        write(
            dir.path(),
            "icon-button/index.tsx",
            r#"
                import { PressableProps } from '../pressable';
                export interface IconButtonProps extends PressableProps { icon: string }
            "#,
        );
        dir
    }

    fn names(props: &[PropDescriptor]) -> Vec<(&str, Option<&str>)> {
        props
            .iter()
            .map(|p| (p.name.as_str(), p.inherited_from.as_deref()))
            .collect()
    }

    #[test]
    fn test_chain_is_followed_to_the_root() {
        let dir = hierarchy();
        let resolver = InheritanceResolver::new(&config(&[dir.path()]));

        let props = resolver.resolve_ancestor_chain("IconButtonProps").unwrap();
        assert_eq!(
            names(&props),
            vec![
                ("icon", Some("IconButtonProps")),
                ("pressed", Some("PressableProps")),
                ("id", Some("BaseComponentProps")),
                ("testId", Some("BaseComponentProps")),
            ]
        );
        assert!(props.iter().all(|p| p.inherited));
    }

    #[test]
    fn test_root_props_are_cached_after_first_load() {
        let dir = hierarchy();
        let resolver = InheritanceResolver::new(&config(&[dir.path()]));

        let first = resolver.resolve_ancestor_chain("BaseComponentProps").unwrap();
        fs::remove_dir_all(dir.path().join("base")).unwrap();
        let second = resolver.resolve_ancestor_chain("BaseComponentProps").unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_name_mismatch_yields_no_props() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "root/props.ts", "export interface RootishProps { id: string }");
        let mut config = config(&[dir.path()]);
        config.resolver.root_props_path = Some(dir.path().join("root/props.ts"));

        let resolver = InheritanceResolver::new(&config);
        assert!(resolver
            .resolve_ancestor_chain("BaseComponentProps")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unresolved_ancestor_is_not_fatal() {
        let dir = hierarchy();
        let resolver = InheritanceResolver::new(&config(&[dir.path()]));
        assert!(resolver.resolve_ancestor_chain("GhostProps").unwrap().is_empty());
    }

    #[test]
    fn test_compiled_ancestor_in_second_root() {
        let first = hierarchy();
        let second = TempDir::new().unwrap();
        let payload = serde_json::json!({
            "version": 3,
            "sources": ["chip.props.ts"],
            "sourcesContent": ["export interface ChipProps extends BaseComponentProps { label: string }"],
        });
        write(second.path(), "dist/chip.props.js.map", &payload.to_string());

        let resolver = InheritanceResolver::new(&config(&[first.path(), second.path()]));
        let props = resolver.resolve_ancestor_chain("ChipProps").unwrap();
        assert_eq!(
            names(&props),
            vec![
                ("label", Some("ChipProps")),
                ("id", Some("BaseComponentProps")),
                ("testId", Some("BaseComponentProps")),
            ]
        );
    }

    #[test]
    fn test_compiled_ancestor_with_external_source_map() {
        let root = hierarchy();
        let map = serde_json::json!({
            "version": 3,
            "sources": ["toggle.props.ts"],
            "sourcesContent": ["export interface ToggleProps extends BaseComponentProps { checked: boolean }"],
        });
        write(
            root.path(),
            "dist/toggle/toggle.props.js",
            "\"use strict\";\n//# sourceMappingURL=toggle.props.js.map\n",
        );
        write(root.path(), "dist/toggle/toggle.props.js.map", &map.to_string());

        let resolver = InheritanceResolver::new(&config(&[root.path()]));
        let props = resolver.resolve_ancestor_chain("ToggleProps").unwrap();
        assert_eq!(
            names(&props),
            vec![
                ("checked", Some("ToggleProps")),
                ("id", Some("BaseComponentProps")),
                ("testId", Some("BaseComponentProps")),
            ]
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "alpha/index.ts", "interface AlphaProps extends BetaProps { a: string }");
        write(dir.path(), "beta/index.ts", "interface BetaProps extends AlphaProps { b: string }");
        let resolver = InheritanceResolver::new(&config(&[dir.path()]));

        match resolver.resolve_ancestor_chain("AlphaProps") {
            Err(DocgenError::CycleDetected { chain }) => {
                assert_eq!(chain, vec!["AlphaProps", "BetaProps", "AlphaProps"]);
            }
            other => panic!("expected a cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_back_to_the_declaring_type() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "beta/index.ts", "interface BetaProps extends AlphaProps { b: string }");
        let resolver = InheritanceResolver::new(&config(&[dir.path()]));

        let err = resolver.resolve_from("AlphaProps", "BetaProps").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ancestor cycle detected: AlphaProps -> BetaProps -> AlphaProps"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let dir = hierarchy();
        write(
            dir.path(),
            "z-extra/pressable/index.ts",
            "export interface PressableProps { shadowed: boolean }",
        );

        let resolver = InheritanceResolver::new(&config(&[dir.path()]));
        let first = resolver.resolve_ancestor_chain("IconButtonProps").unwrap();
        let again = resolver.resolve_ancestor_chain("IconButtonProps").unwrap();
        let fresh = InheritanceResolver::new(&config(&[dir.path()]))
            .resolve_ancestor_chain("IconButtonProps")
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(first, fresh);
        assert!(first.iter().all(|p| p.name != "shadowed"));
    }
}
