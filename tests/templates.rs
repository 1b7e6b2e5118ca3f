use std::{collections::HashMap, fs};

use velocette::{AlternateRenderer, RenderOptions, Value, render, render_template};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
    pairs.iter()
         .map(|(name, value)| ((*name).to_string(), Value::from(*value)))
         .collect()
}

fn render_ok(template: &str, pairs: &[(&str, &str)]) -> String {
    match render(template, &vars(pairs)) {
        Ok(output) => output,
        Err(e) => panic!("Template failed: {e}"),
    }
}

fn render_err(template: &str, pairs: &[(&str, &str)]) -> String {
    match render(template, &vars(pairs)) {
        Ok(output) => panic!("Template succeeded but was expected to fail: {output:?}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn directive_free_templates_pass_through() {
    assert_eq!(render_ok("plain text, no markup", &[]), "plain text, no markup");
    assert_eq!(render_ok("", &[]), "");
    assert_eq!(render_ok("# not a directive", &[]), "# not a directive");
}

#[test]
fn interpolation_uses_raw_values() {
    assert_eq!(render_ok("Hello, $name!", &[("name", "Ada")]), "Hello, Ada!");
    assert_eq!(render_ok("code=$code", &[("code", "0042")]), "code=0042");
    assert_eq!(render_ok("[$missing]", &[]), "[]");
    assert_eq!(render_ok("costs $5", &[]), "costs $5");
}

#[test]
fn set_binds_and_interpolates() {
    assert_eq!(render_ok("#set($x = 2 + 3)$x", &[]), "5");
    assert_eq!(render_ok("#set($s = \"hi\")$s", &[]), "hi");
    assert_eq!(render_ok("#set($x = 1)#set($x = $x + 1)$x", &[]), "2");
}

#[test]
fn division_truncates_toward_zero_at_set() {
    assert_eq!(render_ok("#set($value = 10 / 3)$value", &[]), "3");
    assert_eq!(render_ok("#set($value = -7 / 2)$value", &[]), "-3");
    assert_eq!(render_ok("#set($value = 7 / 2)$value", &[]), "3");
    assert_eq!(render_ok("#set($value = 9 / 3)$value", &[]), "3");
}

#[test]
fn builtin_namespace_cannot_be_shadowed() {
    // Colliding caller variables are dropped at construction.
    let output = render("#set($v = $Integer.parseInt(\"7\"))$v",
                        &vars(&[("Integer", "boom")])).unwrap();
    assert_eq!(output, "7");

    // A #set targeting the namespace is silently ignored, and the builtin
    // keeps working afterwards.
    assert_eq!(render_ok("#set($Integer = 0)#set($value = 10 / 3)$value", &[]),
               "3");
    assert_eq!(render_ok("#set($Integer = 0)#set($v = $Integer.parseInt(\"42\"))$v",
                         &[]),
               "42");
}

#[test]
fn conditional_branches_are_exclusive() {
    let template = "#if($a)A#elseif($b)B#else C#end";

    assert_eq!(render_ok(template, &[("a", "1"), ("b", "1")]), "A");
    assert_eq!(render_ok(template, &[("a", "0"), ("b", "1")]), "B");
    assert_eq!(render_ok(template, &[("a", "0"), ("b", "0")]), " C");
    assert_eq!(render_ok(template, &[]), " C");
}

#[test]
fn nested_conditionals_respect_the_outer_branch() {
    let template = "#if($outer)#if($inner)both#else outer only#end#end";

    assert_eq!(render_ok(template, &[("outer", "1"), ("inner", "1")]), "both");
    assert_eq!(render_ok(template, &[("outer", "1"), ("inner", "0")]), " outer only");
    assert_eq!(render_ok(template, &[("outer", "0"), ("inner", "1")]), "");
}

#[test]
fn dead_branch_conditions_are_never_evaluated() {
    // The #elseif condition divides by zero; a satisfied first branch must
    // keep it from ever being evaluated.
    let template = "#if(true)ok#elseif(1 / 0)boom#end";
    assert_eq!(render_ok(template, &[]), "ok");

    // Same for an #if nested under a dead branch.
    let template = "#if(true)ok#else#if(1 / 0)boom#end#end";
    assert_eq!(render_ok(template, &[]), "ok");

    // A #set under a dead branch must not run either.
    let template = "#if(false)#set($x = 1 / 0)#end done";
    assert_eq!(render_ok(template, &[]), " done");
}

#[test]
fn poisoned_else_is_skipped_when_if_takes() {
    let template = "#if($x == \"\")empty#else#set($y = 1 / 0)$y#end";
    assert_eq!(render_ok(template, &[("x", "")]), "empty");
}

#[test]
fn structural_errors_abort_the_render() {
    let message = render_err("#end", &[]);
    assert!(message.contains("#end"), "unexpected message: {message}");

    render_err("#else", &[]);
    render_err("#elseif($x)", &[]);
    render_err("#if(true)unclosed", &[]);
    render_err("#if(true)#if(false)#end", &[]);
}

#[test]
fn malformed_directives_abort_the_render() {
    render_err("#if($a", &[]);
    render_err("#set($x + 1)", &[]);
    render_err("#set($x == 1)", &[]);
    render_err("#set($x = )", &[]);
    render_err("#set($x = 1 2)", &[]);
}

#[test]
fn unknown_directives_are_literal_text() {
    assert_eq!(render_ok("#foreach($x in $xs)no", &[]), "#foreach($x in $xs)no");
    assert_eq!(render_ok("#if no parens", &[]), "#if no parens");
}

#[test]
fn truncated_expressions_report_the_directive_line() {
    let message = render_err("line one\nline two\n#set($x = 1 +)", &[]);
    assert!(message.contains("line 3"), "unexpected message: {message}");

    let message = render_err("#if(1 +)x#end", &[]);
    assert!(message.contains("line 1"), "unexpected message: {message}");
}

#[test]
fn remainder_overflow_is_an_error() {
    let template = "#set($x = -9223372036854775807 - 1)#set($y = $x % -1)$y";
    let message = render_err(template, &[]);
    assert!(message.contains("overflow"), "unexpected message: {message}");
}

#[test]
fn large_integers_compare_exactly_with_reals() {
    let template = "#if(9007199254740993 == 9007199254740992.0)same#else different#end";
    assert_eq!(render_ok(template, &[]), " different");

    let template = "#if(9007199254740992 == 9007199254740992.0)same#end";
    assert_eq!(render_ok(template, &[]), "same");
}

#[test]
fn runtime_errors_abort_the_render() {
    render_err("#set($x = 1 / 0)", &[]);
    render_err("#set($x = \"a\" - 1)", &[]);
    render_err("#set($x = $Integer.parseInt())", &[]);
    render_err("#set($x = $Integer.parseInt(\"nope\"))", &[]);
    render_err("#set($x = $Integer.noSuchMethod(1))", &[]);
    render_err("#if(-true)x#end", &[]);
}

#[test]
fn numeric_strings_coerce_on_the_expression_path() {
    // "08" would be invalid octal elsewhere; here it is just the number 8.
    assert_eq!(render_ok("#if($n > 5)big#end", &[("n", "08")]), "big");
    assert_eq!(render_ok("#set($sum = $a + $b)$sum", &[("a", "2"), ("b", "3")]), "5");

    // Interpolation keeps the raw string.
    assert_eq!(render_ok("$n", &[("n", "08")]), "08");
}

#[test]
fn comparison_and_logic_operators() {
    assert_eq!(render_ok("#if(3 <= 3 && 4 != 5)yes#end", &[]), "yes");
    assert_eq!(render_ok("#if(false || 2 > 1)yes#end", &[]), "yes");
    assert_eq!(render_ok("#if(!$missing)yes#end", &[]), "yes");
    assert_eq!(render_ok("#if($x == \"\")empty#end", &[("x", "")]), "empty");
    assert_eq!(render_ok("#if(1 == 1.0)same#end", &[]), "same");
}

#[test]
fn arithmetic_operators() {
    assert_eq!(render_ok("#set($x = 2 * 3 + 4)$x", &[]), "10");
    assert_eq!(render_ok("#set($x = 2 + 3 * 4)$x", &[]), "14");
    assert_eq!(render_ok("#set($x = (2 + 3) * 4)$x", &[]), "20");
    assert_eq!(render_ok("#set($x = 10 % 3)$x", &[]), "1");
    assert_eq!(render_ok("#set($x = -4 + 1)$x", &[]), "-3");
}

#[test]
fn string_concatenation() {
    assert_eq!(render_ok("#set($x = \"ab\" + \"cd\")$x", &[]), "abcd");
    assert_eq!(render_ok("#set($x = \"n=\" + 3)$x", &[]), "n=3");
}

#[test]
fn password_age_in_days() {
    // Timestamps arrive as yyMMdd strings; the difference of their parsed
    // values is the age in days within a month.
    let template = "#set($last = $Integer.parseInt($pswLastChangedTime))\
                    #set($now = $Integer.parseInt($nowTime))\
                    #set($age = $now - $last)\
                    $age";
    let output = render_ok(template,
                           &[("pswLastChangedTime", "251221"), ("nowTime", "251229")]);
    assert_eq!(output.trim(), "8");
}

#[test]
fn password_age_template_from_disk() {
    let template = fs::read_to_string("tests/example.vm").unwrap();
    let output = render_ok(&template,
                           &[("pswLastChangedTime", "251221"), ("nowTime", "251229")]);
    assert_eq!(output.trim(), "8");
}

struct Uppercase;

impl AlternateRenderer for Uppercase {
    fn try_render(&self, template: &str, _vars: &HashMap<String, Value>) -> Option<String> {
        template.strip_prefix("upper:").map(str::to_uppercase)
    }
}

#[test]
fn alternate_backend_wins_when_preferred() {
    let options = RenderOptions { prefer_alternate: true,
                                  alternate:        Some(&Uppercase), };

    let output = render_template("upper:abc", &HashMap::new(), &options).unwrap();
    assert_eq!(output, "UPPER:ABC");
}

#[test]
fn declined_alternate_falls_through() {
    let options = RenderOptions { prefer_alternate: true,
                                  alternate:        Some(&Uppercase), };

    let output = render_template("#set($x = 1)$x", &HashMap::new(), &options).unwrap();
    assert_eq!(output, "1");
}

#[test]
fn alternate_is_ignored_unless_preferred() {
    let options = RenderOptions { prefer_alternate: false,
                                  alternate:        Some(&Uppercase), };

    let output = render_template("upper:abc", &HashMap::new(), &options).unwrap();
    assert_eq!(output, "upper:abc");
}
