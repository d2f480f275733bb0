use std::fs;

use luz::{error::ExitCode, host::BufferHost};
use walkdir::WalkDir;

const SEED: u64 = 0x15EED;

fn run_program(src: &str) -> (ExitCode, BufferHost) {
    let mut host = BufferHost::new();
    let code = luz::run_seeded(src, &mut host, false, SEED);
    (code, host)
}

fn transcript(src: &str) -> String {
    let (code, host) = run_program(src);
    assert_eq!(code,
               ExitCode::Success,
               "Script failed: {src:?}\nstderr: {}",
               host.err);
    host.out
}

fn assert_logs(src: &str, expected: &str) {
    assert_eq!(transcript(src), expected, "for script {src:?}");
}

fn assert_fails(src: &str, expected: ExitCode) {
    let (code, host) = run_program(src);
    assert_eq!(code, expected, "for script {src:?}\nstderr: {}", host.err);
    assert!(!host.err.is_empty(), "no error message for {src:?}");
}

#[test]
fn script_fixtures_match_their_transcripts() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "luz")
                                              })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing transcript for {path:?}: {e}"));

        count += 1;
        let (code, host) = run_program(&source);
        assert_eq!(code,
                   ExitCode::Success,
                   "{path:?} failed:\nstderr: {}",
                   host.err);
        assert_eq!(host.out, expected, "transcript mismatch for {path:?}");
    }

    assert!(count > 0, "No fixture scripts found in tests/scripts");
}

#[test]
fn arithmetic_and_floor_division() {
    assert_logs("x = 7; y = 2; log x ~/ y; log \" \"; log x % y", "3 1");
    assert_logs("log 2 ** 10", "1024");
    assert_logs("log 7 / 2", "3.5");
    assert_logs("log 1_000.5e-3", "1.0005");
    assert_logs("log .5", "0.5");
}

#[test]
fn nan_normalises_and_infinity_is_first_class() {
    assert_logs("log 0 / 0", "null");
    assert_logs("log 1 / 0", "inf");
    assert_logs("log -1 / 0", "-inf");
    assert_logs("log typeof (1 / 0)", "inf");
    assert_logs("log typeof -inf", "inf");
}

#[test]
fn big_integers() {
    assert_logs("log 42xl", "42");
    assert_logs("log 1_000xl + 24xl", "1024");
    assert_logs("log 2xl ** 64xl", "18446744073709551616");
    assert_logs("log 7xl ~/ 2xl", "3");
    assert_logs("log 7xl / 2xl", "3.5");
    assert_logs("log typeof 1xl", "xl");
    assert_fails("log 1xl ~/ 0xl", ExitCode::InvalidInstruction);
}

#[test]
fn vector_growth_and_index_write() {
    assert_logs("v = ![1 2 3]; v += 4; v[0] = 10; log v", "![10 2 3 4]");
    assert_logs("v = ![1 2 3 2]; v -= 2; log v", "![1 2 3]");
    assert_logs("v = ![1 2]; log v + 9; log \" \"; log v", "![1 2 9] ![1 2]");
    assert_logs("v = ![2 3]; log 1 + v", "![1 2 3]");
}

#[test]
fn fixed_arrays_refuse_growth() {
    assert_fails("a = [1 2 3]; a += 4", ExitCode::InvalidInstruction);
    assert_fails("log [1] + 1", ExitCode::InvalidInstruction);
    assert_fails("a = [1 2 3]; a[3] = 0", ExitCode::InvalidInstruction);
    assert_fails("a = [1 2 3]; a[-1] = 0", ExitCode::InvalidInstruction);
    assert_logs("a = [1 2 3]; a[1] = 9; log a", "[1 9 3]");
}

#[test]
fn out_of_bounds_reads_are_null() {
    assert_logs("a = [1 2 3]; log a[5]", "null");
    assert_logs("a = [1 2 3]; log a[-1]", "null");
    assert_logs("log \"hi\"[9]", "null");
}

#[test]
fn closed_and_half_open_ranges() {
    assert_logs("log (0..3 as vec); log \" \"; log (0..=3 as vec)",
                "![0 1 2] ![0 1 2 3]");
    assert_logs("log (5..0 as vec)", "![5 4 3 2 1]");
    assert_logs("log (2..2 as vec); log (2..=2 as vec)", "![]![2]");
    assert_logs("log lastof (1..5); log \" \"; log lastof (1..=5)", "4 5");
    assert_logs("log typeof (1..2); log \" \"; log typeof (1..=2)", "ran xran");
}

#[test]
fn range_form_conversions_and_shifts() {
    assert_logs("log ((0..3) as xran)", "0..=2");
    assert_logs("log ((0..=2) as ran)", "0..3");
    assert_logs("r = 0..3; log r + 2", "0..5");
    assert_logs("r = 0..3; log r - 1", "0..2");
    assert_logs("r = 0..3; log 1 + r", "1..3");
    assert_fails("r = 0..3; log r + \"x\"", ExitCode::InvalidInstruction);
}

#[test]
fn range_membership() {
    assert_logs("log ((1..5) has 3)", "true");
    assert_logs("log ((1..5) has 5)", "false");
    assert_logs("log ((1..=5) has 5)", "true");
    assert_logs("log ((5..1) has 5)", "true");
}

#[test]
fn string_interpolation() {
    assert_logs("name = \"luz\"; log \"hi {name}-{1+1}\"", "hi luz-2");
    assert_logs("log \"a{}b\"", "a{}b");
    assert_logs("v = ![1 2 3]; i = 1; log \"{v[i]}\"", "2");
    assert_fails("log \"{1 +\"", ExitCode::SyntaxError);
}

#[test]
fn strings_index_slice_and_concat() {
    assert_logs("log \"hello\"[0]", "h");
    assert_logs("log \"hello\"[1..3]", "el");
    assert_logs("log \"a\" + \"b\"", "ab");
    assert_logs("log (\"hello\" has \"ell\")", "true");
    assert_logs("log lenof \"héllo\"", "5");
    assert_logs("s = \"\"; loop c in \"abc\" { s = c + s }; log s", "cba");
}

#[test]
fn for_in_with_break_value() {
    assert_logs("r = loop i in 1..=5 { if i == 3 { break i*10 } }; log r",
                "30");
    assert_logs("s = 0; loop i in 1..=5 { if i == 3 { continue }; s += i }; log s",
                "12");
    assert_logs("v = ![10 20]; t = 0; loop x in v { t += x }; log t", "30");
}

#[test]
fn while_and_infinite_loops() {
    assert_logs("i = 0; loop i < 3 { i += 1 }; log i", "3");
    assert_logs("i = 0; loop (i < 3) { i += 1 }; log i", "3");
    assert_logs("x = loop { break 42 }; log x", "42");
    assert_logs("i = 0; x = loop { i += 1; if i == 4 { break i } }; log x",
                "4");
}

#[test]
fn loop_scope_is_per_iteration() {
    assert_fails("loop i in 1..=3 { t = i }; log t", ExitCode::SemanticError);
    assert_fails("loop i in 1..=2 { const k = i }; k", ExitCode::SemanticError);
    assert_logs("t = 0; loop i in 1..=3 { t = i }; log t", "3");
}

#[test]
fn sets_remember_last_insertion() {
    assert_logs("s = @{1 2 3}; s += 2; log s", "@{1 3 2}");
    assert_logs("s = @{1 2 3}; s += 2; log lastof s; log firstof s", "21");
    assert_logs("s = @{1 2 2 3}; log s; log \" \"; log lenof s", "@{1 2 3} 3");
    assert_logs("s = @{1 2}; s -= 1; log s", "@{2}");
    assert_logs("log (@{1 2} has 2); log (@{1 2} has 5)", "truefalse");
}

#[test]
fn sets_are_not_iterable_or_indexable() {
    assert_fails("loop x in @{1 2} { }", ExitCode::SemanticError);
    assert_fails("s = @{1 2}; log s[0]", ExitCode::SemanticError);
}

#[test]
fn swap_and_const() {
    assert_logs("a = 1; b = 2; a <=> b; log \"{a},{b}\"", "2,1");
    assert_logs("a = 1; b = 2; log (a <=> b)", "true");
    assert_logs("a = 1; b = 1; log (a <=> b)", "false");
    assert_logs("v = ![1 2]; v[0] <=> v[1]; log v", "![2 1]");
    assert_fails("const c = 5; c = 6", ExitCode::SemanticError);
    assert_fails("const c = 5; c += 1", ExitCode::SemanticError);
    assert_fails("const c = 5; c++", ExitCode::SemanticError);
    assert_fails("const c = 5; del c", ExitCode::SemanticError);
    assert_logs("const c = ![1]; c[0] = 9; log c", "![9]");
}

#[test]
fn prefix_and_postfix_updates() {
    assert_logs("x = 5; log x++; log \" \"; log x", "5 6");
    assert_logs("x = 5; log ++x; log \" \"; log x", "6 6");
    assert_logs("x = 5; log --x", "4");
    assert_logs("v = ![1 2]; v[0]++; log v", "![2 2]");
    assert_fails("x = \"s\"; x++", ExitCode::SemanticError);
}

#[test]
fn length_replication_literals() {
    assert_logs("log [1;3]", "[1 1 1]");
    assert_logs("x = ![logln \"e\"; 3]", "e\ne\ne\n");
    assert_logs("n = 0; v = ![n++; 3]; log v", "![0 1 2]");
    assert_logs("log lenof ![0; 4]", "4");
}

#[test]
fn short_circuit_suppresses_the_right_operand() {
    assert_logs("log (false && (1 as vec))", "false");
    assert_logs("log (true || (1 as vec))", "true");
    assert_logs("log (3 ?? (1 as vec))", "3");
    assert_logs("log (null ?? 3)", "3");
    assert_logs("log (false && undefined_name)", "false");
}

#[test]
fn equality_and_reference_semantics() {
    assert_logs("a = ![1 2]; b = a; b[0] = 9; log a", "![9 2]");
    assert_logs("a = ![1]; b = a; log (a == b)", "true");
    assert_logs("a = ![1]; b = ![1]; log (a == b)", "false");
    assert_logs("log (1 == 1xl)", "true");
    assert_logs("log (2 != 3)", "true");
}

#[test]
fn copyof_is_a_deep_clone() {
    assert_logs("a = ![1 2]; y = copyof a; y += 3; log a; log y",
                "![1 2]![1 2 3]");
    assert_logs("m = ![![1]]; y = copyof m; y[0][0] = 9; log m", "![![1]]");
    assert_logs("x = 5; log copyof x", "5");
}

#[test]
fn comparisons_stay_within_one_numeric_family() {
    assert_logs("log (2 < 3); log (3 >= 3)", "truetrue");
    assert_logs("log (2xl < 3xl)", "true");
    assert_fails("log (1 < 1xl)", ExitCode::SemanticError);
    assert_fails("log (\"a\" < \"b\")", ExitCode::SemanticError);
}

#[test]
fn bitwise_operators() {
    assert_logs("log 6 & 3; log \" \"; log 6 | 3; log \" \"; log 6 ^ 3",
                "2 7 5");
    assert_logs("log 1 << 4; log \" \"; log 32 >> 2", "16 8");
    assert_logs("log ~5", "-6");
    assert_logs("log 12xl & 10xl", "8");
    assert_fails("log 1.5 & 1", ExitCode::RuntimeError);
}

#[test]
fn casts() {
    assert_logs("log (5 as str) + \"!\"", "5!");
    assert_logs("log (\"12\" as num) + 1", "13");
    assert_logs("log (\"12\" as xl) + 1xl", "13");
    assert_logs("log typeof (5 as xl)", "xl");
    assert_logs("log (0 as bool); log (3 as bool)", "falsetrue");
    assert_logs("log (5 as null)", "null");
    assert_logs("log ((1..=3) as str)", "1 2 3");
    assert_logs("log (![1 2] as arr); log typeof (![1 2] as arr)", "[1 2]arr");
    assert_logs("log ([1 2 2] as set)", "@{1 2}");
    assert_logs("log (@{3 1} as vec)", "![3 1]");
    assert_logs("x = 1..4; log (5 as typeof \"t\")", "5");
    assert_fails("log (\"moo\" as num)", ExitCode::SemanticError);
    assert_fails("log (5 as inf)", ExitCode::SemanticError);
    assert_fails("log (true as vec)", ExitCode::SemanticError);
}

#[test]
fn typeof_of_cast_round_trips() {
    for tag in ["num", "bool", "str"] {
        let src = format!("log typeof (1 as {tag})");
        assert_logs(&src, tag);
    }
    assert_logs("log typeof (1 as maybe)", "bool");
}

#[test]
fn maybe_is_deterministic_under_a_seed() {
    let src = "log maybe; log maybe; log (1..=100 as maybe); log (![7] as maybe)";
    let first = transcript(src);
    let second = transcript(src);
    assert_eq!(first, second);
    assert_logs("log (![7] as maybe)", "7");
}

#[test]
fn del_removes_bindings_and_elements() {
    assert_logs("v = ![1 2 3]; del v[1]; log v", "![1 3]");
    assert_logs("s = @{1 2 3}; del s[2]; log s", "@{1 3}");
    assert_fails("a = [1 2]; del a[0]", ExitCode::InvalidInstruction);
    assert_fails("v = ![1]; del v[5]", ExitCode::InvalidInstruction);
    assert_fails("x = 1; del x; log x", ExitCode::SemanticError);
    assert_fails("del nothing", ExitCode::SemanticError);
}

#[test]
fn dotted_positional_access() {
    assert_logs("v = ![10 20]; log v.1", "20");
    assert_logs("m = [![1 2]]; log m.0.1", "2");
    assert_logs("v = ![1 2]; v.0 = 9; log v", "![9 2]");
}

#[test]
fn blocks_write_through_to_outer_names() {
    assert_logs("x = 1; if true { x = 2; y = 5 }; log x", "2");
    assert_fails("if true { y = 5 }; log y", ExitCode::SemanticError);
}

#[test]
fn if_is_an_expression() {
    assert_logs("x = if false { 1 } else if true { 2 } else { 3 }; log x",
                "2");
    assert_logs("log (if false { 1 })", "null");
    assert_logs("x = if (1 < 2) { \"yes\" } else { \"no\" }; log x", "yes");
}

#[test]
fn lenof_sizeof_firstof_lastof() {
    assert_logs("log lenof ![1 2 3]", "3");
    assert_logs("log lenof @{1 1 2}", "2");
    assert_fails("log lenof 5", ExitCode::SemanticError);
    assert_logs("log sizeof null; log \" \"; log sizeof true; log \" \"; log sizeof 1",
                "4 1 8");
    assert_logs("log sizeof \"ab\"", "4");
    assert_logs("log sizeof [1 2]", "16");
    assert_logs("log firstof ![4 5]; log lastof ![4 5]", "45");
    assert_logs("log firstof \"abc\"; log lastof \"abc\"", "ac");
    assert_logs("log firstof ![]", "null");
}

#[test]
fn get_reads_tokens_and_getln_reads_lines() {
    let mut host = BufferHost::with_input(&["1 2", "three"]);
    let code = luz::run_seeded("x = get; y = get; z = get; log \"{x};{y};{z}\"",
                               &mut host,
                               false,
                               SEED);
    assert_eq!(code, ExitCode::Success, "stderr: {}", host.err);
    assert_eq!(host.out, "1;2;three");

    let mut host = BufferHost::with_input(&["a line", "next"]);
    let code = luz::run_seeded("x = getln; log x", &mut host, false, SEED);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(host.out, "a line");

    let mut host = BufferHost::new();
    let code = luz::run_seeded("log (get ?? \"eof\")", &mut host, false, SEED);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(host.out, "eof");
}

#[test]
fn get_prompt_is_shown_when_reading() {
    let mut host = BufferHost::with_input(&["42"]);
    let code = luz::run_seeded("x = get \"n? \"; log x", &mut host, false, SEED);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(host.out, "n? 42");
}

#[test]
fn bare_log_forms() {
    assert_logs("log", "");
    assert_logs("logln", "\n");
    assert_logs("logln 1; logln 2", "1\n2\n");
}

#[test]
fn reserved_but_unimplemented_keywords() {
    assert_fails("fn f() {}", ExitCode::UnimplementedFeature);
    assert_fails("return 1", ExitCode::UnimplementedFeature);
}

#[test]
fn break_outside_a_loop_is_a_semantic_error() {
    assert_fails("break", ExitCode::SemanticError);
    assert_fails("continue", ExitCode::SemanticError);
    assert_fails("x = if true { break 1 }", ExitCode::SemanticError);
}

#[test]
fn stray_semicolons_are_rejected() {
    assert_fails(";", ExitCode::SyntaxError);
    assert_fails("x = 1;; x", ExitCode::SyntaxError);
    assert_logs("x = 1; log x", "1");
}

#[test]
fn syntax_errors() {
    assert_fails("log (1 + ", ExitCode::SyntaxError);
    assert_fails("v = ![1 2", ExitCode::SyntaxError);
    assert_fails("if true { 1", ExitCode::SyntaxError);
    assert_fails("x = 1 ⊕ 2", ExitCode::SyntaxError);
}

#[test]
fn semantic_errors() {
    assert_fails("log undefined_name", ExitCode::SemanticError);
    assert_fails("loop x in 5 { }", ExitCode::SemanticError);
    assert_fails("log (5 has 3)", ExitCode::SemanticError);
    assert_fails("log lenof (1..3)", ExitCode::SemanticError);
}

#[test]
fn accented_identifiers() {
    assert_logs("año = 2026; log año", "2026");
    assert_logs("SEÑAL$1 = \"ok\"; log SEÑAL$1", "ok");
}

#[test]
fn comments_are_skipped() {
    assert_logs("x = 1 // trailing\nlog x", "1");
    assert_logs("x = 2 # hash style\nlog x", "2");
    assert_logs("x = /* inline */ 3; log x", "3");
    assert_logs("/* multi\nline */ log 4", "4");
}

#[test]
fn runs_are_deterministic() {
    let src = "v = ![1 2 3]; loop i in 0..3 { v[i] = v[i] * 2 }; log v; log maybe";
    assert_eq!(transcript(src), transcript(src));
}

#[test]
fn lifecycle_hooks_fire_with_the_exit_code() {
    let (code, host) = run_program("log 1");
    assert_eq!(code, ExitCode::Success);
    assert_eq!(host.ended, vec![ExitCode::Success]);

    let (code, host) = run_program("boom");
    assert_eq!(code, ExitCode::SemanticError);
    assert_eq!(host.ended, vec![ExitCode::SemanticError]);
}

#[test]
fn debug_mode_writes_debug_formatting_to_stderr() {
    let mut host = BufferHost::new();
    let code = luz::run_seeded("x = \"a\tb\"; 42xl", &mut host, true, SEED);
    assert_eq!(code, ExitCode::Success);
    assert_eq!(host.err, "= \"a\\tb\"\n= 42xl\n");
}
