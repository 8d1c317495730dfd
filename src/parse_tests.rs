#[cfg(test)]
mod tests {
    use crate::config::AnalyzerConfig;
    use crate::model::PropDescriptor;
    use crate::parse::{analyze_source, extract_props};
    use pretty_assertions::assert_eq;

    fn props_of(source: &str) -> (String, Vec<PropDescriptor>, Option<String>) {
        let decl = extract_props(source, &AnalyzerConfig::default()).expect("Props declaration");
        (decl.name, decl.props, decl.ancestor)
    }

    #[test]
    fn test_interface_members_and_optionality() {
        let source = r#"
            import { BaseComponentProps } from '../base';

            export interface ButtonProps extends BaseComponentProps {
                caption: string;
                disabled?: boolean;
                value: string | undefined;
            }
        "#;
        let (name, props, ancestor) = props_of(source);

        assert_eq!(name, "ButtonProps");
        assert_eq!(ancestor.as_deref(), Some("BaseComponentProps"));
        assert_eq!(
            props,
            vec![
                PropDescriptor::own("caption", "string", false),
                PropDescriptor::own("disabled", "boolean", true),
                PropDescriptor::own("value", "string | undefined", false),
            ]
        );
    }

    #[test]
    fn test_only_first_heritage_type_is_kept() {
        let source = "interface ChipProps extends BaseProps, Focusable { label: string }";
        let (_, _, ancestor) = props_of(source);
        assert_eq!(ancestor.as_deref(), Some("BaseProps"));
    }

    #[test]
    fn test_method_signature_becomes_function_typed_prop() {
        let source = r#"
            interface ToggleProps {
                onToggle(checked: boolean, source: Element): void;
                onReset?(): void;
            }
        "#;
        let (_, props, _) = props_of(source);

        assert_eq!(props[0].name, "onToggle");
        assert_eq!(props[0].type_text, "(checked: boolean, source: Element) => void");
        assert!(props[0].is_function_typed());
        assert_eq!(props[1].type_text, "() => void");
        assert!(props[1].optional);
    }

    #[test]
    fn test_class_defaults_strip_casts() {
        let source = r#"
            export class SliderProps extends RangeProps<number> {
                min: number = 0;
                max = 100;
                step?: number;
                size: Size = 'medium' as Size;
                static defaults = {};
            }
        "#;
        let (name, props, ancestor) = props_of(source);

        assert_eq!(name, "SliderProps");
        assert_eq!(ancestor.as_deref(), Some("RangeProps"));
        assert_eq!(
            props,
            vec![
                PropDescriptor::own("min", "number", false).with_default(Some("0".to_string())),
                PropDescriptor::own("max", "any", false).with_default(Some("100".to_string())),
                PropDescriptor::own("step", "number", true),
                PropDescriptor::own("size", "Size", false)
                    .with_default(Some("'medium'".to_string())),
            ]
        );
    }

    #[test]
    fn test_unnamed_members_are_not_counted() {
        let source = r#"
            export interface GridProps {
                [key: string]: unknown;
                [Symbol.iterator]: () => Iterator<string>;
                rows: number;
                columns?: number;
            }
        "#;
        let (_, props, _) = props_of(source);
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["rows", "columns"]);
    }

    #[test]
    fn test_computed_and_private_class_keys_are_skipped() {
        let source = r#"
            const slot = 'slot';
            export class PanelProps {
                [slot]: string = 'body';
                #internal = 1;
                title: string = 'Panel';
            }
        "#;
        let (_, props, _) = props_of(source);
        assert_eq!(
            props,
            vec![PropDescriptor::own("title", "string", false)
                .with_default(Some("'Panel'".to_string()))]
        );
    }

    #[test]
    fn test_intersection_alias() {
        let source = r#"
            export type CardProps = BaseComponentProps & {
                title: string;
                elevated?: boolean;
            };
        "#;
        let (name, props, ancestor) = props_of(source);

        assert_eq!(name, "CardProps");
        assert_eq!(ancestor.as_deref(), Some("BaseComponentProps"));
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["title", "elevated"]);
    }

    #[test]
    fn test_non_object_alias_is_not_a_declaration() {
        let source = r#"
            type SizeProps = 'small' | 'large';
            interface BadgeProps { count: number }
        "#;
        let (name, _, _) = props_of(source);
        assert_eq!(name, "BadgeProps");
    }

    #[test]
    fn test_first_props_declaration_wins() {
        let source = r#"
            interface ListProps { items: string[] }
            interface ListItemProps { text: string }
        "#;
        let (name, props, _) = props_of(source);
        assert_eq!(name, "ListProps");
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_methods_skip_props_and_state_declarations() {
        let source = r#"
            export class ButtonState { toggle(): void {} }
            export class Button extends Component<ButtonProps> {
                componentDidMount() {}
                click(times: number = 1): Promise<void> { return Promise.resolve(); }
                setLabel(label: string) {}
            }
        "#;
        let methods = analyze_source(source, &AnalyzerConfig::default()).methods;
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, vec!["click", "setLabel"]);
        assert_eq!(methods[0].return_type, "Promise<void>");
        assert!(methods[0].params[0].optional);
        assert_eq!(methods[1].return_type, "void");
        assert_eq!(methods[1].params[0].type_text, "string");
    }

    #[test]
    fn test_angle_bracket_assertion_falls_back_to_ts() {
        let source = r#"
            const fallback = <string>window.name;
            interface PanelProps { open: boolean }
        "#;
        let (name, _, _) = props_of(source);
        assert_eq!(name, "PanelProps");
    }
}
