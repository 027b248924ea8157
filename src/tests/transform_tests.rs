use crate::config::{ParseModule, PluginConfig};
use crate::error::TransformError;
use crate::transform::{inline_resources, transform};

fn run(code: &str) -> String {
    transform(code, &PluginConfig::default())
}

fn keep_url() -> PluginConfig {
    PluginConfig {
        keep_url: true,
        ..Default::default()
    }
}

#[test]
fn test_template_and_style_urls() {
    let input = "@Component({templateUrl: './a.html', styleUrls: ['./a.css']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({template: require('./a.html'), styles: [require('./a.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_existing_styles_are_appended() {
    let input = "@Component({templateUrl: './a.html', styleUrls: ['./a.css'], styles: ['.x{}']})\nclass A {}\n";
    let output = run(input);
    assert_eq!(
        output,
        "@Component({template: require('./a.html'), styles: [require('./a.css'), '.x{}']})\nclass A {}\n"
    );
    assert!(!output.contains("styleUrls"));
    assert_eq!(output.matches("styles").count(), 1);
}

#[test]
fn test_styles_before_style_urls() {
    let input = "@Component({styles: [`a {}`, 'b {}'], styleUrls: ['x.css']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({styles: [require('./x.css'), `a {}`, 'b {}']})\nclass A {}\n"
    );
}

#[test]
fn test_keep_url() {
    let input = "@Component({templateUrl: './a.html', styleUrls: ['./a.css']})\nclass A {}\n";
    assert_eq!(
        transform(input, &keep_url()),
        "@Component({templateUrl: require('./a.html'), styleUrls: [require('./a.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_keep_url_still_merges_styles() {
    let input = "@Component({styleUrls: ['./a.css'], styles: ['.x{}']})\nclass A {}\n";
    assert_eq!(
        transform(input, &keep_url()),
        "@Component({styleUrls: [require('./a.css'), '.x{}']})\nclass A {}\n"
    );
}

#[test]
fn test_invalid_source_is_returned_unchanged() {
    let input = "@Component({templateUrl: './a.html'}) export class {{";
    assert_eq!(run(input), input);

    let err = inline_resources(input, &PluginConfig::default()).unwrap_err();
    assert!(matches!(err, TransformError::Parse { .. }));
}

#[test]
fn test_only_the_metadata_decorator_changes() {
    let input = "@Injectable(SOME_TOKEN)\n@Component({templateUrl: 'a.html'})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Injectable(SOME_TOKEN)\n@Component({template: require('./a.html')})\nclass A {}\n"
    );
}

#[test]
fn test_every_metadata_decorator_is_rewritten() {
    let input = "@Component({templateUrl: 'a.html'})\n@Other({styleUrls: ['b.css']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({template: require('./a.html')})\n@Other({styles: [require('./b.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_undecorated_code_is_byte_identical() {
    let input = r#"// header comment
import { Component } from '@angular/core';

export class   Plain {
    meta = {templateUrl: './plain.html',   styleUrls: ["./plain.css"]};
}

const config = {  templateUrl: 'loose.html' };
"#;
    assert_eq!(run(input), input);
}

#[test]
fn test_metadata_without_urls_is_unchanged() {
    let input = r#"@Component({
  selector:    'app-inline',
  template: '<p>{{ value }}</p>',
  styles: ['p { color: red; }'],
})
export class Inline {}
"#;
    assert_eq!(run(input), input);
}

#[test]
fn test_formatting_around_rewrite_is_preserved() {
    let input = r#"import { Component } from '@angular/core';

/** The root component. */
@Component({
    selector: 'app-root',   // keep me
    templateUrl: './app.component.html',
    styleUrls: [
        './app.component.css',
        "../shared/theme.css",
    ],
})
export class AppComponent {
    title   =  'app';
}
"#;
    let expected = r#"import { Component } from '@angular/core';

/** The root component. */
@Component({
    selector: 'app-root',   // keep me
    template: require('./app.component.html'),
    styles: [
        require('./app.component.css'),
        require('../shared/theme.css'),
    ],
})
export class AppComponent {
    title   =  'app';
}
"#;
    assert_eq!(run(input), expected);
}

#[test]
fn test_second_pass_is_a_no_op() {
    let input = "@Component({templateUrl: 'a.html', styleUrls: ['a.css'], styles: ['.x{}']})\nclass A {}\n";
    let once = run(input);
    assert_eq!(run(&once), once);
}

#[test]
fn test_paths_are_sanitized() {
    let input = r#"@Component({templateUrl: "views/it's.html", styleUrls: ['c:\\styles\\a.css']})
class A {}
"#;
    let expected = r#"@Component({template: require('./views/it\'s.html'), styles: [require('./c:\\styles\\a.css')]})
class A {}
"#;
    assert_eq!(run(input), expected);
}

#[test]
fn test_non_literal_template_url_is_left_alone() {
    let input = "@Component({templateUrl: TEMPLATE, styleUrls: ['a.css']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({templateUrl: TEMPLATE, styles: [require('./a.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_style_urls_with_computed_entry_are_left_alone() {
    let input =
        "@Component({templateUrl: 'a.html', styleUrls: ['a.css', base + '.css'], styles: ['.x{}']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({template: require('./a.html'), styleUrls: ['a.css', base + '.css'], styles: ['.x{}']})\nclass A {}\n"
    );
}

#[test]
fn test_non_array_styles_become_a_spread() {
    let input = "@Component({styleUrls: ['a.css'], styles: SHARED_STYLES})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({styles: [require('./a.css'), ...SHARED_STYLES]})\nclass A {}\n"
    );
}

#[test]
fn test_empty_style_urls_take_existing_styles() {
    let input = "@Component({styleUrls: [], styles: ['.x{}', '.y{}'], selector: 'x'})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({styles: ['.x{}', '.y{}'], selector: 'x'})\nclass A {}\n"
    );
}

#[test]
fn test_empty_metadata_object() {
    let input = "@Component({})\nclass A {}\n";
    assert_eq!(run(input), input);
}

#[test]
fn test_default_export_class() {
    let input = "@Component({templateUrl: 'a.html'})\nexport default class A {}\n";
    assert_eq!(
        run(input),
        "@Component({template: require('./a.html')})\nexport default class A {}\n"
    );
}

#[test]
fn test_babel_parser() {
    let config = PluginConfig {
        parse_module: ParseModule::Babel,
        ..Default::default()
    };
    let input = "@Component({templateUrl: 'a.html'})\nexport class A {}\n";
    assert_eq!(
        transform(input, &config),
        "@Component({template: require('./a.html')})\nexport class A {}\n"
    );

    let typed = "@Component({templateUrl: 'a.html'})\nexport class A { x: number = 1; }\n";
    assert_eq!(transform(typed, &config), typed);
}

#[test]
fn test_byte_order_mark_is_kept() {
    let input = "\u{feff}@Component({templateUrl: 'a.html'})\nclass A {}\n";
    assert_eq!(
        run(input),
        "\u{feff}@Component({template: require('./a.html')})\nclass A {}\n"
    );
}

#[test]
fn test_non_ascii_source_offsets() {
    let input = "// héllo wörld ✓\n@Component({templateUrl: 'ünï.html', styleUrls: ['ß.css']})\nclass A {}\n";
    assert_eq!(
        run(input),
        "// héllo wörld ✓\n@Component({template: require('./ünï.html'), styles: [require('./ß.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_line_break_in_path_is_escaped() {
    let input = "@Component({templateUrl: 'a\\nb.html', styleUrls: ['c\\u2028.css']})\nclass A {}\n";
    let output = run(input);
    assert_eq!(
        output,
        "@Component({template: require('./a\\nb.html'), styles: [require('./c\\u2028.css')]})\nclass A {}\n"
    );
    assert!(inline_resources(&output, &PluginConfig::default()).is_ok());
}

#[test]
fn test_style_urls_keep_their_key_next_to_a_styles_method() {
    let input = "@Component({styleUrls: ['a.css'], styles() { return []; }})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({styleUrls: [require('./a.css')], styles() { return []; }})\nclass A {}\n"
    );

    let getter = "@Component({get styles() { return []; }, styleUrls: ['a.css']})\nclass A {}\n";
    assert_eq!(
        run(getter),
        "@Component({get styles() { return []; }, styleUrls: [require('./a.css')]})\nclass A {}\n"
    );
}

#[test]
fn test_holes_in_styles_are_dropped() {
    let input = "@Component({styleUrls: ['a.css'], styles: [, '.x{}',]})\nclass A {}\n";
    assert_eq!(
        run(input),
        "@Component({styles: [require('./a.css'), '.x{}']})\nclass A {}\n"
    );

    let only_hole = "@Component({styleUrls: ['a.css'], styles: [,]})\nclass A {}\n";
    assert_eq!(
        run(only_hole),
        "@Component({styles: [require('./a.css')]})\nclass A {}\n"
    );
}
